use crate::report::{Column, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, Schema, TableDefinition};
use crate::seed::TableSeed;

use super::{RunContext, Scenario};

/// Numeric inventory codes translated to labels with a simple CASE.
pub struct InventoryStatus;

impl Scenario for InventoryStatus {
    fn name(&self) -> &'static str {
        "inventory-status"
    }

    fn summary(&self) -> &'static str {
        "Inventory status codes as readable labels"
    }

    fn db_file(&self) -> &'static str {
        "inventory_status.db"
    }

    fn schema(&self) -> Schema {
        Schema::new().add_table(
            TableDefinition::new("Items")
                .column(ColumnDefinition::new("item_id", DataType::Integer).primary_key())
                .column(ColumnDefinition::new("code_inventory", DataType::Integer)),
        )
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![TableSeed::new(
            "Items",
            vec![
                row![101, 0],
                row![102, 1],
                row![103, 2],
                row![104, 3],
                // unknown code
                row![105, 99],
            ],
        )]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![Report::labeled(
            "Inventory status report",
            "SELECT item_id,
                    CASE code_inventory
                        WHEN 0 THEN 'In stock'
                        WHEN 1 THEN 'Quality check'
                        WHEN 2 THEN 'Ready to ship'
                        WHEN 3 THEN 'In transit'
                        ELSE 'Written off/Unknown'
                    END AS InventoryStatus
             FROM Items
             ORDER BY item_id",
            vec![Column::new("Item ID"), Column::new("Status")],
        )]
    }
}
