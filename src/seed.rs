//! Batch insertion of literal seed rows.

use tracing::debug;

use crate::error::{Error, Result};
use crate::sqlite::Database;
use crate::value::Value;

/// Literal rows for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSeed {
    pub table: String,
    /// Target columns. Empty means a positional insert over every column.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl TableSeed {
    /// Positional seed: each row supplies every column in declaration order.
    pub fn new(table: impl Into<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            rows,
        }
    }

    /// Seed only the named columns, e.g. to let `AUTOINCREMENT` assign keys.
    pub fn with_columns(table: impl Into<String>, columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
        Self {
            table: table.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    fn insert_sql(&self, width: usize) -> String {
        let placeholders = (1..=width)
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        if self.columns.is_empty() {
            format!("INSERT INTO {} VALUES ({placeholders})", self.table)
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({placeholders})",
                self.table,
                self.columns.join(", ")
            )
        }
    }
}

/// Rows inserted into one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCount {
    pub table: String,
    pub rows: usize,
}

/// Insert every seed inside one transaction, parents before children.
///
/// Seeds are reordered by their table's position in the schema, which
/// [`Schema::validate`](crate::schema::Schema::validate) guarantees to be a
/// foreign-key-safe order. Any failure rolls back the whole seed.
pub fn seed(db: &mut Database, seeds: &[TableSeed]) -> Result<Vec<SeedCount>> {
    let mut ordered = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let schema = db.schema();
        let position = schema.position(&seed.table).ok_or_else(|| Error::InvalidSeed {
            table: seed.table.clone(),
            reason: "table is not part of the schema".into(),
        })?;
        let table = &schema.tables[position];

        if let Some(unknown) = seed.columns.iter().find(|c| table.find_column(c).is_none()) {
            return Err(Error::InvalidSeed {
                table: seed.table.clone(),
                reason: format!("unknown column {unknown}"),
            });
        }

        let width = if seed.columns.is_empty() {
            table.columns.len()
        } else {
            seed.columns.len()
        };
        if let Some((i, row)) = seed.rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::InvalidSeed {
                table: seed.table.clone(),
                reason: format!("row {i} has {} values, expected {width}", row.len()),
            });
        }

        ordered.push((position, width, seed));
    }
    // Stable, so several seeds for one table keep their relative order.
    ordered.sort_by_key(|(position, _, _)| *position);

    let tx = db.connection_mut().transaction()?;
    let mut counts = Vec::with_capacity(ordered.len());
    for (_, width, seed) in ordered {
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(&seed.insert_sql(width))?;
            for row in &seed.rows {
                inserted += stmt.execute(rusqlite::params_from_iter(row.iter()))?;
            }
        }
        debug!(table = %seed.table, rows = inserted, "seeded table");
        counts.push(SeedCount {
            table: seed.table.clone(),
            rows: inserted,
        });
    }
    tx.commit()?;

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;
    use crate::schema::{ColumnDefinition, DataType, ForeignKey, Schema, TableDefinition};
    use crate::sqlite::SqliteConfig;

    fn teams_and_workers(dir: &std::path::Path, foreign_keys: bool) -> Result<Database> {
        let schema = Schema::new()
            .add_table(
                TableDefinition::new("Teams")
                    .column(ColumnDefinition::new("TeamID", DataType::Integer).primary_key())
                    .column(ColumnDefinition::new("GroupName", DataType::Text).not_null()),
            )
            .add_table(
                TableDefinition::new("Workers")
                    .column(ColumnDefinition::new("WorkerID", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("Name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("TeamRefID", DataType::Integer))
                    .foreign_key(ForeignKey::new("TeamRefID", "Teams", "TeamID")),
            );
        Database::initialize(
            &SqliteConfig::new(dir.join("seed.db"), schema).with_foreign_keys(foreign_keys),
        )
    }

    #[test]
    fn children_listed_first_are_inserted_after_parents() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut db = teams_and_workers(dir.path(), true)?;

        let seeds = vec![
            TableSeed::with_columns(
                "Workers",
                &["Name", "TeamRefID"],
                vec![row!["Marina", 1], row!["Ilya", 2]],
            ),
            TableSeed::new("Teams", vec![row![1, "Development"], row![2, "Marketing"]]),
        ];
        let counts = seed(&mut db, &seeds)?;

        assert_eq!(
            counts,
            vec![
                SeedCount { table: "Teams".into(), rows: 2 },
                SeedCount { table: "Workers".into(), rows: 2 },
            ]
        );
        assert_eq!(db.row_count("Workers")?, 2);
        Ok(())
    }

    #[test]
    fn failed_insert_rolls_back_everything() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut db = teams_and_workers(dir.path(), true)?;

        let seeds = vec![
            TableSeed::new("Teams", vec![row![1, "Development"]]),
            TableSeed::with_columns("Workers", &["Name", "TeamRefID"], vec![row!["Jessica", 5]]),
        ];
        assert!(matches!(seed(&mut db, &seeds), Err(Error::Sqlite(_))));
        assert_eq!(db.row_count("Teams")?, 0);
        Ok(())
    }

    #[test]
    fn dangling_reference_is_kept_without_pragma() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut db = teams_and_workers(dir.path(), false)?;

        let seeds = vec![TableSeed::with_columns(
            "Workers",
            &["Name", "TeamRefID"],
            vec![row!["Jessica", 5]],
        )];
        seed(&mut db, &seeds)?;
        assert_eq!(db.row_count("Workers")?, 1);
        Ok(())
    }

    #[test]
    fn rejects_malformed_seeds_before_touching_the_database() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut db = teams_and_workers(dir.path(), false)?;

        let short_row = vec![TableSeed::new("Teams", vec![row![1, "Sales"], row![2]])];
        let err = seed(&mut db, &short_row).unwrap_err();
        assert!(err.to_string().contains("row 1 has 1 values, expected 2"));

        let unknown_table = vec![TableSeed::new("Projects", vec![])];
        assert!(matches!(
            seed(&mut db, &unknown_table),
            Err(Error::InvalidSeed { .. })
        ));

        let unknown_column = vec![TableSeed::with_columns("Teams", &["Budget"], vec![row![1]])];
        assert!(seed(&mut db, &unknown_column).is_err());

        assert_eq!(db.row_count("Teams")?, 0);
        Ok(())
    }
}
