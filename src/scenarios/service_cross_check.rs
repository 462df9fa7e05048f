use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, Schema, TableDefinition};
use crate::seed::TableSeed;

use super::{RunContext, Scenario};

/// Users registered on both of two platforms.
pub struct ServiceCrossCheck;

fn platform_table(name: &str) -> TableDefinition {
    TableDefinition::new(name)
        .column(ColumnDefinition::new("PID", DataType::Integer).primary_key())
        .column(ColumnDefinition::new("Alias", DataType::Text).not_null())
}

impl Scenario for ServiceCrossCheck {
    fn name(&self) -> &'static str {
        "service-cross-check"
    }

    fn summary(&self) -> &'static str {
        "Users present on both platforms"
    }

    fn db_file(&self) -> &'static str {
        "service_cross_check.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(platform_table("PlatformA_Users"))
            .add_table(platform_table("PlatformB_Users"))
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "PlatformA_Users",
                vec![
                    row![1, "Alice"],
                    row![2, "Bob"],
                    row![3, "Charlie"],
                    row![4, "David"],
                ],
            ),
            TableSeed::new(
                "PlatformB_Users",
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
            "Users on both platforms",
            "SELECT A.PID, A.Alias
             FROM PlatformA_Users A
             INNER JOIN PlatformB_Users B ON A.PID = B.PID
             ORDER BY A.PID",
            vec![Column::new("ID"), Column::new("Alias")],
        )
        .when_empty("No shared users.")]
    }
}
