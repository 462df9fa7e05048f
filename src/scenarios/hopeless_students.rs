use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, ForeignKey, Schema, TableDefinition};
use crate::seed::TableSeed;

use super::{RunContext, Scenario};

/// Students with no submitted work, found with an anti-join.
pub struct HopelessStudents;

impl Scenario for HopelessStudents {
    fn name(&self) -> &'static str {
        "hopeless-students"
    }

    fn summary(&self) -> &'static str {
        "Students who submitted nothing"
    }

    fn db_file(&self) -> &'static str {
        "hopeless_students.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(
                TableDefinition::new("StudentsList")
                    .column(ColumnDefinition::new("student_id", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("full_name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("group_num", DataType::Text)),
            )
            .add_table(
                TableDefinition::new("SubmissionsLog")
                    .column(ColumnDefinition::new("submission_pk", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("assignment_code", DataType::Text))
                    .column(ColumnDefinition::new("student_ref_id", DataType::Integer))
                    .column(ColumnDefinition::new("grade", DataType::Real))
                    .foreign_key(ForeignKey::new("student_ref_id", "StudentsList", "student_id")),
            )
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "StudentsList",
                vec![
                    row![1, "Ivanov P.K.", "Group A"],
                    row![2, "Sidorova V.A.", "Group B"],
                    row![3, "Petrov A.N.", "Group A"],
                    row![4, "Kuznetsova E.D.", "Group B"],
                    row![5, "Smirnov R.V.", "Group A"],
                ],
            ),
            TableSeed::new(
                "SubmissionsLog",
                vec![
                    row![101, "A1", 1, 95.5],
                    row![102, "A2", 3, 88.0],
                    row![103, "A1", 5, 75.0],
                    row![104, "A3", 1, 90.0],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![Report::labeled(
            "Students who have not submitted any work",
            "SELECT s.student_id, s.full_name, s.group_num
             FROM StudentsList s
             LEFT JOIN SubmissionsLog l ON s.student_id = l.student_ref_id
             WHERE l.submission_pk IS NULL
             ORDER BY s.student_id",
            vec![
                Column::new("ID").width(5),
                Column::new("Name").width(20),
                Column::new("Group"),
            ],
        )
        .when_empty("Every student has submitted work.")]
    }
}
