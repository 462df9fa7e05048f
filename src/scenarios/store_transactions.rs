use crate::report::{Column, Layout, Report};
use crate::row;
use crate::schema::{
    ColumnDefinition, DataType, ForeignKey, IndexDefinition, Schema, TableDefinition,
};
use crate::seed::TableSeed;
use crate::sqlite::{Params, SqlQuery};

use super::{RunContext, Scenario};

/// Earliest transaction date counted as a recent purchase.
pub const RECENT_SINCE: &str = "2023-01-01";

/// A small store: clients, item groups, items, transactions and their lines.
pub struct StoreTransactions;

impl Scenario for StoreTransactions {
    fn name(&self) -> &'static str {
        "store-transactions"
    }

    fn summary(&self) -> &'static str {
        "Store transactions with per-order and per-client totals"
    }

    fn db_file(&self) -> &'static str {
        "store_transactions.db"
    }

    fn foreign_keys(&self) -> bool {
        true
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(
                TableDefinition::new("Clients")
                    .column(ColumnDefinition::new("client_pk", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("full_name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("contact_email", DataType::Text).not_null()),
            )
            .add_table(
                TableDefinition::new("ItemGroups")
                    .column(ColumnDefinition::new("group_pk", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("group_title", DataType::Text).not_null()),
            )
            .add_table(
                TableDefinition::new("StoreItems")
                    .column(ColumnDefinition::new("item_pk", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("item_name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("unit_price", DataType::Real).not_null())
                    .column(ColumnDefinition::new("group_ref_id", DataType::Integer))
                    .foreign_key(ForeignKey::new("group_ref_id", "ItemGroups", "group_pk")),
            )
            .add_table(
                TableDefinition::new("Transactions")
                    .column(ColumnDefinition::new("transaction_pk", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("client_ref_id", DataType::Integer))
                    .column(ColumnDefinition::new("transaction_date", DataType::Text).not_null())
                    .foreign_key(ForeignKey::new("client_ref_id", "Clients", "client_pk")),
            )
            .add_table(
                TableDefinition::new("TransactionDetails")
                    .column(ColumnDefinition::new("detail_pk", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("transaction_ref_id", DataType::Integer))
                    .column(ColumnDefinition::new("item_ref_id", DataType::Integer))
                    .column(ColumnDefinition::new("purchased_count", DataType::Integer).not_null())
                    .foreign_key(ForeignKey::new(
                        "transaction_ref_id",
                        "Transactions",
                        "transaction_pk",
                    ))
                    .foreign_key(ForeignKey::new("item_ref_id", "StoreItems", "item_pk")),
            )
            .add_index(IndexDefinition::new(
                "idx_details_transaction",
                "TransactionDetails",
                &["transaction_ref_id"],
            ))
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::with_columns(
                "Clients",
                &["full_name", "contact_email"],
                vec![
                    row!["Viktor Smirnov", "victor@tech.ru"],
                    row!["Olga Petrova", "olga@mail.com"],
                    row!["Maxim Ivanov", "maximov@corp.net"],
                ],
            ),
            TableSeed::with_columns(
                "ItemGroups",
                &["group_title"],
                vec![row!["Groceries"], row!["Sports"], row!["Software"]],
            ),
            TableSeed::with_columns(
                "StoreItems",
                &["item_name", "unit_price", "group_ref_id"],
                vec![
                    row!["Coffee Machine", 650.0, 1],
                    row!["Thermos", 50.0, 1],
                    row!["Running Shoes", 90.0, 2],
                    row!["Fitness Band", 35.0, 2],
                    row!["Antivirus Premium", 12.5, 3],
                    row!["Graphics Editor", 55.0, 3],
                ],
            ),
            TableSeed::with_columns(
                "Transactions",
                &["client_ref_id", "transaction_date"],
                vec![
                    row![1, "2023-01-20"],
                    row![2, "2022-11-05"],
                    row![1, "2023-09-01"],
                    row![3, "2023-06-25"],
                ],
            ),
            TableSeed::with_columns(
                "TransactionDetails",
                &["transaction_ref_id", "item_ref_id", "purchased_count"],
                vec![
                    row![1, 1, 1],
                    row![1, 2, 2],
                    row![2, 3, 1],
                    row![3, 6, 1],
                    row![3, 5, 2],
                    row![4, 4, 1],
                    row![4, 1, 1],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        let recent_clients = SqlQuery::new(
            "SELECT DISTINCT C.full_name, C.contact_email
             FROM Clients C
             INNER JOIN Transactions T ON C.client_pk = T.client_ref_id
             WHERE T.transaction_date >= :since
             ORDER BY C.full_name",
        )
        .with_params(Params::new().with_value("since", RECENT_SINCE));

        vec![
            Report::new(
                format!("1. Clients with transactions since {RECENT_SINCE}"),
                recent_clients,
                Layout::Table(vec![Column::new("Client"), Column::new("Email")]),
            ),
            Report::table(
                "2. Units sold per item group",
                "SELECT G.group_title, SUM(TD.purchased_count) AS total_items_shipped
                 FROM TransactionDetails TD
                 JOIN StoreItems SI ON TD.item_ref_id = SI.item_pk
                 JOIN ItemGroups G ON SI.group_ref_id = G.group_pk
                 GROUP BY G.group_pk
                 ORDER BY G.group_pk",
                vec![Column::new("Group"), Column::new("Units")],
            ),
            Report::table(
                "3. Three most expensive items",
                "SELECT item_name, unit_price
                 FROM StoreItems
                 ORDER BY unit_price DESC
                 LIMIT 3",
                vec![Column::new("Item"), Column::new("Price").precision(2)],
            ),
            Report::table(
                "4. Transaction totals",
                "SELECT T.transaction_pk, C.full_name,
                        SUM(SI.unit_price * TD.purchased_count) AS final_transaction_amount
                 FROM Transactions T
                 JOIN Clients C ON T.client_ref_id = C.client_pk
                 JOIN TransactionDetails TD ON T.transaction_pk = TD.transaction_ref_id
                 JOIN StoreItems SI ON TD.item_ref_id = SI.item_pk
                 GROUP BY T.transaction_pk
                 ORDER BY T.transaction_pk",
                vec![
                    Column::new("Transaction"),
                    Column::new("Client"),
                    Column::new("Total").precision(2),
                ],
            ),
            Report::labeled(
                "5. Client with the highest spending",
                "SELECT C.full_name, SUM(SI.unit_price * TD.purchased_count) AS total_spending
                 FROM Clients C
                 JOIN Transactions T ON C.client_pk = T.client_ref_id
                 JOIN TransactionDetails TD ON T.transaction_pk = TD.transaction_ref_id
                 JOIN StoreItems SI ON TD.item_ref_id = SI.item_pk
                 GROUP BY C.client_pk
                 ORDER BY total_spending DESC
                 LIMIT 1",
                vec![Column::new("Client"), Column::new("Total").precision(2)],
            ),
        ]
    }
}
