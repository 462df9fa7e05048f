use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, Schema, TableDefinition};
use crate::seed::TableSeed;

use super::{RunContext, Scenario};

/// Current staff against historical records, compared with `EXCEPT` both ways.
pub struct StaffDivision;

fn staff_table(name: &str) -> TableDefinition {
    TableDefinition::new(name)
        .column(ColumnDefinition::new("StaffID", DataType::Integer).primary_key())
        .column(ColumnDefinition::new("WorkerName", DataType::Text).not_null())
        .column(ColumnDefinition::new("Division", DataType::Text).not_null())
}

fn staff_columns() -> Vec<Column> {
    vec![
        Column::new("ID"),
        Column::new("Name"),
        Column::new("Division"),
    ]
}

impl Scenario for StaffDivision {
    fn name(&self) -> &'static str {
        "staff-division"
    }

    fn summary(&self) -> &'static str {
        "Current staff versus past records"
    }

    fn db_file(&self) -> &'static str {
        "staff_division.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(staff_table("CurrentStaff"))
            .add_table(staff_table("PastRecords"))
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "CurrentStaff",
                vec![
                    row![1, "Ivan Ivanov", "Sales"],
                    row![2, "Maria Petrova", "Marketing"],
                    row![3, "Sergey Sidorov", "IT"],
                    row![4, "Olga Smirnova", "IT"],
                ],
            ),
            TableSeed::new(
                "PastRecords",
                vec![
                    row![5, "Anna Kuznetsova", "Sales"],
                    row![6, "Petr Petrov", "Marketing"],
                    row![3, "Sergey Sidorov", "IT"],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![
            Report::labeled(
                "1. Only in current staff",
                "SELECT StaffID, WorkerName, Division FROM CurrentStaff
                 EXCEPT
                 SELECT StaffID, WorkerName, Division FROM PastRecords
                 ORDER BY StaffID",
                staff_columns(),
            )
            .when_empty("None found."),
            Report::labeled(
                "2. Only in past records",
                "SELECT StaffID, WorkerName, Division FROM PastRecords
                 EXCEPT
                 SELECT StaffID, WorkerName, Division FROM CurrentStaff
                 ORDER BY StaffID",
                staff_columns(),
            )
            .when_empty("None found."),
        ]
    }
}
