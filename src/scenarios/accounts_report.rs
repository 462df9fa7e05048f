use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, Schema, TableDefinition};
use crate::seed::TableSeed;

use super::{RunContext, Scenario};

/// Accounts present on both the desktop and the mobile client.
pub struct AccountsReport;

fn clients_table(name: &str) -> TableDefinition {
    TableDefinition::new(name)
        .column(ColumnDefinition::new("AccountID", DataType::Integer).primary_key())
        .column(ColumnDefinition::new("ScreenName", DataType::Text).not_null())
}

impl Scenario for AccountsReport {
    fn name(&self) -> &'static str {
        "accounts-report"
    }

    fn summary(&self) -> &'static str {
        "Accounts shared between desktop and mobile clients"
    }

    fn db_file(&self) -> &'static str {
        "accounts_report.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(clients_table("DesktopClients"))
            .add_table(clients_table("MobileClients"))
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "DesktopClients",
                vec![
                    row![1, "Alice"],
                    row![2, "Bob"],
                    row![3, "Charlie"],
                    row![4, "David"],
                ],
            ),
            TableSeed::new(
                "MobileClients",
                vec![
                    row![3, "Charlie"],
                    row![4, "David"],
                    row![5, "Eve"],
                    row![6, "Frank"],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![Report::labeled(
            "Accounts used on both desktop and mobile",
            "SELECT DC.AccountID, DC.ScreenName
             FROM DesktopClients DC
             JOIN MobileClients MC ON DC.AccountID = MC.AccountID
             ORDER BY DC.AccountID",
            vec![Column::new("Account"), Column::new("Screen name")],
        )]
    }
}
