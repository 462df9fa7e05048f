use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, Schema, TableDefinition};
use crate::seed::TableSeed;

use super::{RunContext, Scenario};

/// Members lost and gained between two yearly lists, via EXCEPT.
pub struct ClientsChurn;

fn members_table(name: &str) -> TableDefinition {
    TableDefinition::new(name)
        .column(ColumnDefinition::new("UserID_PK", DataType::Integer).primary_key())
        .column(ColumnDefinition::new("DisplayName", DataType::Text).not_null())
}

fn difference(title: &str, source: &str, target: &str) -> Report {
    let sql = format!(
        "SELECT UserID_PK, DisplayName FROM {source}
         EXCEPT
         SELECT UserID_PK, DisplayName FROM {target}
         ORDER BY UserID_PK"
    );
    Report::labeled(
        title,
        &sql,
        vec![Column::new("ID").width(5), Column::new("Name")],
    )
    .when_empty("None found.")
}

impl Scenario for ClientsChurn {
    fn name(&self) -> &'static str {
        "clients-churn"
    }

    fn summary(&self) -> &'static str {
        "Clients who left and clients who joined"
    }

    fn db_file(&self) -> &'static str {
        "clients_churn.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(members_table("InitialMembers"))
            .add_table(members_table("FinalMembers"))
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "InitialMembers",
                vec![
                    row![1, "Maxim Galkin"],
                    row![2, "Darya Kozlova"],
                    row![3, "Kirill Semenov"],
                    row![4, "Polina Volkova"],
                ],
            ),
            TableSeed::new(
                "FinalMembers",
                vec![
                    row![3, "Kirill Semenov"],
                    row![4, "Polina Volkova"],
                    row![5, "Stanislav Larin"],
                    row![6, "Elena Romanova"],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![
            difference(
                "Clients present in 2024 but missing in 2025",
                "InitialMembers",
                "FinalMembers",
            ),
            difference(
                "Clients new in 2025, absent in 2024",
                "FinalMembers",
                "InitialMembers",
            ),
        ]
    }
}
