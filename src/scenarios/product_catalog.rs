use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, Schema, TableDefinition};
use crate::seed::TableSeed;

use super::{RunContext, Scenario};

/// Two product categories merged into one catalogue of European and Asian goods.
pub struct ProductCatalog;

fn inventory_table(name: &str) -> TableDefinition {
    TableDefinition::new(name)
        .column(ColumnDefinition::new("Prod_ID", DataType::Integer).primary_key())
        .column(ColumnDefinition::new("Item_Name", DataType::Text).not_null())
        .column(ColumnDefinition::new("Mfg_City", DataType::Text).not_null())
        .column(ColumnDefinition::new("Mfg_Region", DataType::Text).not_null())
}

impl Scenario for ProductCatalog {
    fn name(&self) -> &'static str {
        "product-catalog"
    }

    fn summary(&self) -> &'static str {
        "Tech and home products made in Europe or Asia"
    }

    fn db_file(&self) -> &'static str {
        "product_catalog.db"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(inventory_table("Tech_Inventory"))
            .add_table(inventory_table("Home_Inventory"))
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::new(
                "Tech_Inventory",
                vec![
                    row![101, "Smartwatch X5", "Shenzhen", "Asia"],
                    row![102, "E-Reader Pro", "Munich", "Europe"],
                    row![103, "Gaming Mouse", "Taipei", "Asia"],
                    row![104, "Wireless Charger", "Paris", "Europe"],
                ],
            ),
            TableSeed::new(
                "Home_Inventory",
                vec![
                    row![201, "Coffee Machine", "Milan", "Europe"],
                    row![202, "Vacuum Cleaner", "Kyoto", "Asia"],
                    row![203, "Smart Speaker", "New York", "Americas"],
                    row![204, "Electric Kettle", "Shenzhen", "Asia"],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![Report::labeled(
            "Products from Europe and Asia",
            "SELECT Prod_ID, Item_Name, Mfg_City, Mfg_Region, 'Tech' AS Category
             FROM Tech_Inventory
             WHERE Mfg_Region IN ('Europe', 'Asia')
             UNION ALL
             SELECT Prod_ID, Item_Name, Mfg_City, Mfg_Region, 'Home' AS Category
             FROM Home_Inventory
             WHERE Mfg_Region IN ('Europe', 'Asia')
             ORDER BY Mfg_City, Item_Name",
            vec![
                Column::new("ID").width(5),
                Column::new("Item").width(20),
                Column::new("City").width(10),
                Column::new("Region").width(6),
                Column::new("Category"),
            ],
        )]
    }
}
