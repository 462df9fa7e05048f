use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, ForeignKey, Schema, TableDefinition};
use crate::seed::TableSeed;

use super::{RunContext, Scenario};

/// Faculty members with no class assigned.
pub struct TeachersWithoutClasses;

impl Scenario for TeachersWithoutClasses {
    fn name(&self) -> &'static str {
        "teachers-without-classes"
    }

    fn summary(&self) -> &'static str {
        "Teachers with no assigned classes"
    }

    fn db_file(&self) -> &'static str {
        "teachers_without_classes.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(
                TableDefinition::new("Faculty")
                    .column(ColumnDefinition::new("teacher_id", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("full_name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("department", DataType::Text)),
            )
            .add_table(
                TableDefinition::new("ClassAssignments")
                    .column(ColumnDefinition::new("assignment_id", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("teacher_ref_id", DataType::Integer))
                    .column(ColumnDefinition::new("class_code", DataType::Text))
                    .column(ColumnDefinition::new("semester", DataType::Text))
                    .foreign_key(ForeignKey::new("teacher_ref_id", "Faculty", "teacher_id")),
            )
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "Faculty",
                vec![
                    row![10, "Smirnova I.V.", "Mathematics"],
                    row![20, "Petrov S.N.", "Physics"],
                    row![30, "Ivanov A.P.", "History"],
                    row![40, "Vasilieva E.A.", "Computer Science"],
                ],
            ),
            TableSeed::new(
                "ClassAssignments",
                vec![
                    row![1001, 10, "MATH101", "Fall 2024"],
                    row![1002, 30, "HIST205", "Fall 2024"],
                    row![1003, 10, "MATH210", "Fall 2024"],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![Report::labeled(
            "Teachers without classes",
            "SELECT t.teacher_id, t.full_name, t.department
             FROM Faculty t
             LEFT JOIN ClassAssignments a ON t.teacher_id = a.teacher_ref_id
             WHERE a.assignment_id IS NULL
             ORDER BY t.teacher_id",
            vec![
                Column::new("ID").width(5),
                Column::new("Name").width(20),
                Column::new("Department"),
            ],
        )
        .when_empty("Every teacher has a class.")]
    }
}
