use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, ForeignKey, Schema, TableDefinition};
use crate::seed::TableSeed;

use super::{RunContext, Scenario};

/// Developers who used at least two distinct tools, from the activity log.
pub struct DevopsProductivity;

impl Scenario for DevopsProductivity {
    fn name(&self) -> &'static str {
        "devops-productivity"
    }

    fn summary(&self) -> &'static str {
        "Developers active with two or more distinct tools"
    }

    fn db_file(&self) -> &'static str {
        "devops_productivity.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(
                TableDefinition::new("SoftwareTools")
                    .column(ColumnDefinition::new("ToolID", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("ToolName", DataType::Text).not_null())
                    .column(ColumnDefinition::new("UsageArea", DataType::Text)),
            )
            .add_table(
                TableDefinition::new("Developers")
                    .column(ColumnDefinition::new("DevID", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("DevName", DataType::Text).not_null())
                    .column(ColumnDefinition::new("Seniority", DataType::Text)),
            )
            .add_table(
                TableDefinition::new("ActivityLog")
                    .column(ColumnDefinition::new("LogID", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("DevID", DataType::Integer))
                    .column(ColumnDefinition::new("ToolID", DataType::Integer))
                    .column(ColumnDefinition::new("LogDate", DataType::Text))
                    .column(ColumnDefinition::new("Description", DataType::Text))
                    .foreign_key(ForeignKey::new("DevID", "Developers", "DevID"))
                    .foreign_key(ForeignKey::new("ToolID", "SoftwareTools", "ToolID")),
            )
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "SoftwareTools",
                vec![
                    row![1, "Git (Version Control)", "Code Management"],
                    row![2, "Jira (Task Tracker)", "Project Planning"],
                    row![3, "Grafana (Monitoring)", "Operations"],
                    row![4, "VS Code (Editor)", "Development"],
                ],
            ),
            TableSeed::new(
                "Developers",
                vec![
                    row![10, "Svetlana", "Senior"],
                    row![20, "Dmitry", "Junior"],
                    row![30, "Elena", "Middle"],
                ],
            ),
            TableSeed::new(
                "ActivityLog",
                vec![
                    // Svetlana: Git and Jira, two tools
                    row![100, 10, 1, "2024-10-25 09:30:00", "Updating API documentation"],
                    row![101, 10, 2, "2024-10-25 11:00:00", "Setting up a new monitoring dashboard"],
                    // Dmitry: Grafana only
                    row![102, 20, 3, "2024-10-25 14:00:00", "Checking server load"],
                    // Elena: VS Code twice, still one tool
                    row![103, 30, 4, "2024-10-25 15:30:00", "Writing unit tests"],
                    row![104, 30, 4, "2024-10-25 17:00:00", "Running the build locally"],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![Report::table(
            "Developers using at least two different tools",
            "SELECT d.DevName, d.Seniority, t.ToolName, l.LogDate, l.Description
             FROM ActivityLog l
             JOIN Developers d ON l.DevID = d.DevID
             JOIN SoftwareTools t ON l.ToolID = t.ToolID
             WHERE l.DevID IN (
                 SELECT DevID
                 FROM ActivityLog
                 GROUP BY DevID
                 HAVING COUNT(DISTINCT ToolID) >= 2
             )
             ORDER BY d.DevName, l.LogDate",
            vec![
                Column::new("Developer").width(15),
                Column::new("Level").width(8),
                Column::new("Tool").width(25),
                Column::new("Log date").width(20),
                Column::new("Description"),
            ],
        )
        .when_empty("No developer used two or more distinct tools.")]
    }
}
