use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, ForeignKey, Schema, TableDefinition};
use crate::seed::TableSeed;
use crate::value::Value;

use super::{RunContext, Scenario};

/// Workers joined to their teams; one reference dangles, one is NULL.
pub struct CompanyRecords;

impl Scenario for CompanyRecords {
    fn name(&self) -> &'static str {
        "company-records"
    }

    fn summary(&self) -> &'static str {
        "Workers and their teams"
    }

    fn db_file(&self) -> &'static str {
        "company_records.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(
                TableDefinition::new("Teams")
                    .column(ColumnDefinition::new("TeamID", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("GroupName", DataType::Text).not_null())
                    .column(ColumnDefinition::new("TeamLeadID", DataType::Integer)),
            )
            .add_table(
                TableDefinition::new("Workers")
                    .column(ColumnDefinition::new("WorkerID", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("Name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("Surname", DataType::Text).not_null())
                    .column(ColumnDefinition::new("TeamRefID", DataType::Integer))
                    .foreign_key(ForeignKey::new("TeamRefID", "Teams", "TeamID")),
            )
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "Teams",
                vec![
                    row![1, "Development", 501],
                    row![2, "Marketing", 502],
                    row![3, "Sales", 503],
                ],
            ),
            TableSeed::new(
                "Workers",
                vec![
                    row![1, "Marina", "Koval", 1],
                    row![2, "Ilya", "Burov", 2],
                    // team 5 does not exist
                    row![3, "Jessica", "Moore", 5],
                    row![4, "Timur", "Safiullin", Value::Null],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![
            Report::table(
                "Workers with a team (INNER JOIN)",
                "SELECT W.WorkerID, W.Name, W.Surname, T.GroupName
                 FROM Workers W
                 INNER JOIN Teams T ON W.TeamRefID = T.TeamID
                 ORDER BY W.WorkerID",
                vec![
                    Column::new("ID"),
                    Column::new("Name"),
                    Column::new("Surname"),
                    Column::new("Team"),
                ],
            ),
            Report::table(
                "Workers without a resolvable team",
                "SELECT W.WorkerID, W.Name, W.Surname, W.TeamRefID
                 FROM Workers W
                 LEFT JOIN Teams T ON W.TeamRefID = T.TeamID
                 WHERE T.TeamID IS NULL
                 ORDER BY W.WorkerID",
                vec![
                    Column::new("ID"),
                    Column::new("Name"),
                    Column::new("Surname"),
                    Column::new("Team ref"),
                ],
            )
            .when_empty("Every worker belongs to a team."),
        ]
    }
}
