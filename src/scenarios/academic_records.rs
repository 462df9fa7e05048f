use crate::report::{Column, Layout, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, ForeignKey, Schema, TableDefinition};
use crate::seed::TableSeed;
use crate::sqlite::{Params, SqlQuery};

use super::{RunContext, Scenario};

/// Surnames starting with "I".
pub const SURNAME_PATTERN: &str = "I%";

/// Pupils, their disciplines, and a surname-filtered enrolment listing.
pub struct AcademicRecords;

impl Scenario for AcademicRecords {
    fn name(&self) -> &'static str {
        "academic-records"
    }

    fn summary(&self) -> &'static str {
        "Pupil enrolments filtered by surname"
    }

    fn db_file(&self) -> &'static str {
        "academic_records.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(
                TableDefinition::new("Pupils")
                    .column(ColumnDefinition::new("PupilID", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("Name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("Surname", DataType::Text).not_null()),
            )
            .add_table(
                TableDefinition::new("Disciplines")
                    .column(ColumnDefinition::new("DisciplineID", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("Title", DataType::Text).not_null()),
            )
            .add_table(
                TableDefinition::new("Assignments")
                    .column(ColumnDefinition::new("AssignmentID", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("PupilID", DataType::Integer))
                    .column(ColumnDefinition::new("DisciplineID", DataType::Integer))
                    .foreign_key(ForeignKey::new("PupilID", "Pupils", "PupilID"))
                    .foreign_key(ForeignKey::new("DisciplineID", "Disciplines", "DisciplineID")),
            )
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "Pupils",
                vec![
                    row![1, "Ivan", "Ivanov"],
                    row![2, "Maria", "Petrova"],
                    row![3, "Igor", "Isaev"],
                    row![4, "Alexey", "Smirnov"],
                    row![5, "Irina", "Ilyina"],
                ],
            ),
            TableSeed::new(
                "Disciplines",
                vec![
                    row![1, "Mathematics"],
                    row![2, "Physics"],
                    row![3, "Computer Science"],
                ],
            ),
            TableSeed::new(
                "Assignments",
                vec![
                    row![1, 1, 1],
                    row![2, 1, 3],
                    row![3, 2, 2],
                    row![4, 3, 3],
                    row![5, 4, 1],
                    row![6, 5, 2],
                    row![7, 5, 3],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        let query = SqlQuery::new(
            "SELECT P.PupilID, P.Name, P.Surname, D.Title
             FROM Pupils P
             INNER JOIN Assignments A ON P.PupilID = A.PupilID
             INNER JOIN Disciplines D ON A.DisciplineID = D.DisciplineID
             WHERE P.Surname LIKE :pattern
             ORDER BY P.PupilID, D.Title",
        )
        .with_params(Params::new().with_value("pattern", SURNAME_PATTERN));

        vec![Report::new(
            format!("Pupils with surnames matching '{SURNAME_PATTERN}'"),
            query,
            Layout::Table(vec![
                Column::new("ID").width(2),
                Column::new("Name").width(10),
                Column::new("Surname").width(10),
                Column::new("Course"),
            ]),
        )
        .when_empty("No pupils match the filter.")]
    }
}
