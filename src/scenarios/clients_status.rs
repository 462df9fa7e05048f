use chrono::{Duration, NaiveDate};

use crate::report::{Column, Layout, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, Schema, TableDefinition};
use crate::seed::TableSeed;
use crate::sqlite::{Params, SqlQuery};
use crate::value::Value;

use super::{RunContext, Scenario};

pub const VIP_THRESHOLD: i64 = 50_000;
pub const RECENT_DAYS: i64 = 60;
pub const CHURN_DAYS: i64 = 180;

/// Loyalty segmentation of users with a CASE over revenue and recency.
pub struct ClientsStatus;

fn days_before(as_of: NaiveDate, days: i64) -> Value {
    (as_of - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
        .into()
}

impl Scenario for ClientsStatus {
    fn name(&self) -> &'static str {
        "clients-status"
    }

    fn summary(&self) -> &'static str {
        "User segments: VIP, churn risk, regular"
    }

    fn db_file(&self) -> &'static str {
        "clients_status.db"
    }

    fn schema(&self) -> Schema {
        Schema::new().add_table(
            TableDefinition::new("UserActivity")
                .column(ColumnDefinition::new("user_pk", DataType::Integer).primary_key())
                .column(ColumnDefinition::new("alias_name", DataType::Text).not_null())
                .column(ColumnDefinition::new("last_txn_date", DataType::Text))
                .column(ColumnDefinition::new("gross_revenue", DataType::Real)),
        )
    }

    fn seeds(&self, ctx: &RunContext) -> Vec<TableSeed> {
        let as_of = ctx.as_of;
        vec![TableSeed::new(
            "UserActivity",
            vec![
                row![101, "Phoenix", days_before(as_of, 10), 60000.0],
                row![102, "Rider_77", days_before(as_of, 200), 30000.0],
                row![103, "ShadowLord", days_before(as_of, 100), 40000.0],
                row![104, "Viktoria_S", days_before(as_of, 30), 20000.0],
                row![105, "Anna_K", Value::Null, 70000.0],
            ],
        )]
    }

    fn reports(&self, ctx: &RunContext) -> Vec<Report> {
        let query = SqlQuery::new(
            "SELECT alias_name,
                    CASE
                        WHEN gross_revenue > :vip_threshold
                             AND last_txn_date IS NOT NULL
                             AND julianday(:as_of) - julianday(last_txn_date) <= :recent_days
                            THEN 'VIP'
                        WHEN last_txn_date IS NULL
                             OR julianday(:as_of) - julianday(last_txn_date) > :churn_days
                            THEN 'Churn risk'
                        ELSE 'Regular'
                    END AS user_segment
             FROM UserActivity
             ORDER BY alias_name",
        )
        .with_params(
            Params::new()
                .with_value("as_of", ctx.as_of.format("%Y-%m-%d").to_string())
                .with_value("vip_threshold", VIP_THRESHOLD)
                .with_value("recent_days", RECENT_DAYS)
                .with_value("churn_days", CHURN_DAYS),
        );

        vec![Report::new(
            format!("User status as of {}", ctx.as_of),
            query,
            Layout::Labeled(vec![Column::new("Name").width(15), Column::new("Status")]),
        )]
    }
}
