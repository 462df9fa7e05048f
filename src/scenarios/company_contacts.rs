use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, Schema, TableDefinition};
use crate::seed::TableSeed;
use crate::value::Value;

use super::{RunContext, Scenario};

/// One de-duplicated phone list merged from three departments.
pub struct CompanyContacts;

fn department_table(name: &str) -> TableDefinition {
    TableDefinition::new(name)
        .column(ColumnDefinition::new("Contact_Alias", DataType::Text))
        .column(ColumnDefinition::new("Mobile_Num", DataType::Text))
}

impl Scenario for CompanyContacts {
    fn name(&self) -> &'static str {
        "company-contacts"
    }

    fn summary(&self) -> &'static str {
        "Merged contact list of all departments"
    }

    fn db_file(&self) -> &'static str {
        "company_contacts.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(department_table("Dept_Sales"))
            .add_table(department_table("Dept_HR"))
            .add_table(department_table("Dept_Operations"))
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "Dept_Sales",
                vec![
                    row!["Viktor Smirnov", "444111"],
                    row!["Oleg Dymov", Value::Null],
                    row!["Viktor Smirnov", "444111"],
                ],
            ),
            TableSeed::new(
                "Dept_HR",
                vec![
                    row!["Ekaterina Levina", "888222"],
                    row!["Oleg Dymov", Value::Null],
                    row!["Anna Zaitseva", "666333"],
                ],
            ),
            TableSeed::new(
                "Dept_Operations",
                vec![
                    row!["Gleb Orlov", "999000"],
                    row!["Anna Zaitseva", "666333"],
                    row!["Marina Krotova", Value::Null],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![Report::table(
            "Contacts of all departments",
            "WITH AllContacts AS (
                 SELECT Contact_Alias, Mobile_Num FROM Dept_Sales
                 UNION ALL
                 SELECT Contact_Alias, Mobile_Num FROM Dept_HR
                 UNION ALL
                 SELECT Contact_Alias, Mobile_Num FROM Dept_Operations
             )
             SELECT DISTINCT Contact_Alias, COALESCE(Mobile_Num, 'UNKNOWN') AS Mobile_Number
             FROM AllContacts
             ORDER BY Contact_Alias",
            vec![Column::new("Name").width(20), Column::new("Phone").width(15)],
        )]
    }
}
