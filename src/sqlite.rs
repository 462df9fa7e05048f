use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, ToSql};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::value::Value;

/// Named parameter bindings for SQL queries
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    pub values: BTreeMap<String, Value>,
}

impl Params {
    /// Create a new Params object
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value. A missing `:` prefix is added.
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        let name = if name.starts_with([':', '@', '$']) {
            name.to_string()
        } else {
            format!(":{name}")
        };
        self.values.insert(name, value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn bindings(&self) -> Vec<(&str, &dyn ToSql)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect()
    }
}

/// SQL Query with typed parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub statement: String,
    pub params: Params,
}

impl SqlQuery {
    pub fn new(statement: &str) -> Self {
        Self {
            statement: statement.to_string(),
            params: Params::new(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

/// Fully materialized result of one query.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// All values of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }
}

/// SQLite configuration for one scenario run
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// Schema definition for the database
    pub schema: Schema,
    /// Value of `PRAGMA foreign_keys`, issued before creating the schema
    pub foreign_keys: bool,
}

impl SqliteConfig {
    /// Create a new SQLite config with path and schema
    pub fn new(db_path: impl Into<PathBuf>, schema: Schema) -> Self {
        Self {
            db_path: db_path.into(),
            schema,
            foreign_keys: false,
        }
    }

    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }
}

/// An open scenario database: one file, one connection, one schema.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    path: PathBuf,
    schema: Schema,
}

impl Database {
    /// Delete any existing file at the configured path, open a fresh
    /// database there and create the schema.
    pub fn initialize(config: &SqliteConfig) -> Result<Self> {
        config.schema.validate()?;

        let path = config.db_path.clone();
        reset_file(&path)?;
        info!(path = %path.display(), "creating database");

        let conn = Connection::open(&path)?;
        // Set either way: bundled builds default enforcement to on.
        conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;

        let ddl = config.schema.to_sql();
        debug!(tables = config.schema.tables.len(), "executing schema script");
        conn.execute_batch(&ddl)?;

        Ok(Self {
            conn,
            path,
            schema: config.schema.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    pub fn foreign_keys_enabled(&self) -> Result<bool> {
        Ok(self
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))?)
    }

    /// Run one read statement and materialize every row.
    pub fn query(&self, query: &SqlQuery) -> Result<ResultSet> {
        let mut stmt = self.conn.prepare(&query.statement)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let bindings = query.params.bindings();
        let mut rows = stmt.query(bindings.as_slice())?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                cells.push(Value::from(row.get_ref(i)?));
            }
            out.push(cells);
        }

        debug!(rows = out.len(), "query materialized");
        Ok(ResultSet { columns, rows: out })
    }

    pub fn row_count(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", table.replace('"', "\"\""));
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    /// Release the connection, surfacing any close failure.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Sqlite(e))
    }
}

fn reset_file(path: &Path) -> Result<()> {
    let reset_err = |source| Error::Reset {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(reset_err)?;
    }
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed previous database file");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(reset_err(e)),
    }
}
