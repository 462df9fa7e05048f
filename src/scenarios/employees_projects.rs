use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, ForeignKey, Schema, TableDefinition};
use crate::seed::TableSeed;
use crate::value::Value;

use super::{RunContext, Scenario};

/// HR overview: outer joins both ways, an anti-join, and a full outer join
/// assembled from two left joins.
pub struct EmployeesProjects;

impl Scenario for EmployeesProjects {
    fn name(&self) -> &'static str {
        "employees-projects"
    }

    fn summary(&self) -> &'static str {
        "Employees, projects and who works on what"
    }

    fn db_file(&self) -> &'static str {
        "employees_projects.db"
    }

    fn null_placeholder(&self) -> Option<&'static str> {
        Some("NONE")
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(
                TableDefinition::new("employees")
                    .column(ColumnDefinition::new("employee_id", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("employee_name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("department", DataType::Text)),
            )
            .add_table(
                TableDefinition::new("projects")
                    .column(ColumnDefinition::new("project_id", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("project_name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("assigned_employee_id", DataType::Integer))
                    .foreign_key(ForeignKey::new(
                        "assigned_employee_id",
                        "employees",
                        "employee_id",
                    )),
            )
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "employees",
                vec![
                    row![1, "Ivan Ivanov", "Sales"],
                    row![2, "Maria Petrova", "Development"],
                    row![3, "Alexey Smirnov", "Development"],
                    row![4, "Olga Kuznetsova", "Marketing"],
                    row![5, "Dmitry Vasiliev", "Sales"],
                    row![6, "Elena Fedorova", "Finance"],
                ],
            ),
            TableSeed::new(
                "projects",
                vec![
                    row![101, "Project Alpha", 1],
                    row![102, "Project Beta", 2],
                    row![103, "Project Gamma", Value::Null],
                    row![104, "Project Delta", 3],
                    row![105, "Project Epsilon", Value::Null],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![
            Report::table(
                "1. Employees and their projects (all employees)",
                "SELECT e.employee_name, e.department, p.project_name
                 FROM employees e
                 LEFT JOIN projects p ON e.employee_id = p.assigned_employee_id
                 ORDER BY e.employee_name",
                vec![
                    Column::new("Employee"),
                    Column::new("Department"),
                    Column::new("Project"),
                ],
            ),
            Report::table(
                "2. Projects and assigned employees (all projects)",
                "SELECT p.project_name, e.employee_name
                 FROM projects p
                 LEFT JOIN employees e ON p.assigned_employee_id = e.employee_id
                 ORDER BY p.project_name",
                vec![Column::new("Project"), Column::new("Assigned employee")],
            ),
            Report::table(
                "3. Employees without projects",
                "SELECT e.employee_name, e.department
                 FROM employees e
                 LEFT JOIN projects p ON e.employee_id = p.assigned_employee_id
                 WHERE p.project_id IS NULL
                 ORDER BY e.employee_name",
                vec![Column::new("Employee"), Column::new("Department")],
            )
            .when_empty("Every employee has a project."),
            Report::table(
                "4. Full overview",
                "SELECT e.employee_name AS Entity1, p.project_name AS Entity2
                 FROM employees e
                 LEFT JOIN projects p ON e.employee_id = p.assigned_employee_id
                 UNION
                 SELECT e.employee_name AS Entity1, p.project_name AS Entity2
                 FROM projects p
                 LEFT JOIN employees e ON p.assigned_employee_id = e.employee_id
                 WHERE e.employee_id IS NULL
                 ORDER BY Entity1 NULLS LAST, Entity2 NULLS LAST",
                vec![Column::new("Employee"), Column::new("Project")],
            ),
        ]
    }
}
