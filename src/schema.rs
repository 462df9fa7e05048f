//! Typed schema definitions and their rendering to SQLite DDL.
//!
//! A [`Schema`] lists its tables in declaration order. [`Schema::validate`]
//! requires every foreign key to reference a table declared earlier (or the
//! table itself), so declaration order is always a parents-before-children
//! order that the seeder can rely on.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::error::{Error, Result};

/// Schema definition for the SQLite database
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
    pub indexes: Vec<IndexDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    pub fn add_index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Position of `name` in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name == name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tables.is_empty() {
            return Err(Error::InvalidSchema("schema declares no tables".into()));
        }

        let mut declared: HashSet<&str> = HashSet::new();
        for table in &self.tables {
            if table.columns.is_empty() {
                return Err(Error::InvalidSchema(format!(
                    "table {} has no columns",
                    table.name
                )));
            }

            let mut columns: HashSet<&str> = HashSet::new();
            for column in &table.columns {
                if !columns.insert(column.name.as_str()) {
                    return Err(Error::InvalidSchema(format!(
                        "table {} declares column {} twice",
                        table.name, column.name
                    )));
                }
            }

            for key in &table.primary_key {
                if !columns.contains(key.as_str()) {
                    return Err(Error::InvalidSchema(format!(
                        "primary key of {} names unknown column {key}",
                        table.name
                    )));
                }
            }

            for fk in &table.foreign_keys {
                if !columns.contains(fk.column.as_str()) {
                    return Err(Error::InvalidSchema(format!(
                        "foreign key on {} names unknown column {}",
                        table.name, fk.column
                    )));
                }
                let parent_known = fk.foreign_table == table.name
                    || declared.contains(fk.foreign_table.as_str());
                if !parent_known {
                    return Err(Error::InvalidSchema(format!(
                        "{}.{} references {}, which is not declared before it",
                        table.name, fk.column, fk.foreign_table
                    )));
                }
            }

            if !declared.insert(table.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "table {} declared twice",
                    table.name
                )));
            }
        }

        for index in &self.indexes {
            let table = self.table(&index.table).ok_or_else(|| {
                Error::InvalidSchema(format!(
                    "index {} is on unknown table {}",
                    index.name, index.table
                ))
            })?;
            if let Some(missing) = index.columns.iter().find(|c| table.find_column(c).is_none()) {
                return Err(Error::InvalidSchema(format!(
                    "index {} names unknown column {missing}",
                    index.name
                )));
            }
        }

        Ok(())
    }

    /// Render the whole schema as one script for `execute_batch`.
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        for table in &self.tables {
            sql.push_str(&table.to_sql());
            sql.push('\n');
        }
        for index in &self.indexes {
            sql.push_str(&index.to_sql());
            sql.push('\n');
        }
        sql
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    /// Table-level (composite) primary key. Single-column keys usually use
    /// [`ColumnConstraint::PrimaryKey`] instead.
    pub primary_key: Vec<String>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    pub fn find_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn to_sql(&self) -> String {
        let mut parts: Vec<String> = self.columns.iter().map(ColumnDefinition::to_sql).collect();
        if !self.primary_key.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", self.primary_key.join(", ")));
        }
        parts.extend(self.foreign_keys.iter().map(ForeignKey::to_sql));

        let mut sql = format!("CREATE TABLE {} (\n", self.name);
        for (i, part) in parts.iter().enumerate() {
            let sep = if i + 1 < parts.len() { "," } else { "" };
            let _ = writeln!(sql, "    {part}{sep}");
        }
        sql.push_str(");");
        sql
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
    pub default_value: Option<DefaultValue>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: Vec::new(),
            default_value: None,
        }
    }

    pub fn primary_key(self) -> Self {
        self.constraint(ColumnConstraint::PrimaryKey)
    }

    /// `INTEGER PRIMARY KEY AUTOINCREMENT`.
    pub fn auto_increment(self) -> Self {
        self.primary_key().constraint(ColumnConstraint::AutoIncrement)
    }

    pub fn not_null(self) -> Self {
        self.constraint(ColumnConstraint::NotNull)
    }

    pub fn unique(self) -> Self {
        self.constraint(ColumnConstraint::Unique)
    }

    pub fn check(self, expr: impl Into<String>) -> Self {
        self.constraint(ColumnConstraint::Check(expr.into()))
    }

    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    fn constraint(mut self, c: ColumnConstraint) -> Self {
        if !self.constraints.contains(&c) {
            self.constraints.push(c);
        }
        self
    }

    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        // SQLite only accepts AUTOINCREMENT directly after PRIMARY KEY.
        for c in &self.constraints {
            match c {
                ColumnConstraint::PrimaryKey => {
                    sql.push_str(" PRIMARY KEY");
                    if self.constraints.contains(&ColumnConstraint::AutoIncrement) {
                        sql.push_str(" AUTOINCREMENT");
                    }
                }
                ColumnConstraint::AutoIncrement => {}
                ColumnConstraint::NotNull => sql.push_str(" NOT NULL"),
                ColumnConstraint::Unique => sql.push_str(" UNIQUE"),
                ColumnConstraint::Check(expr) => {
                    let _ = write!(sql, " CHECK ({expr})");
                }
            }
        }
        if let Some(default) = &self.default_value {
            let _ = write!(sql, " DEFAULT {}", default.as_sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
    Real,
    Blob,
    Boolean,
}

impl DataType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
            DataType::Real => "REAL",
            DataType::Blob => "BLOB",
            DataType::Boolean => "BOOLEAN",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    PrimaryKey,
    AutoIncrement,
    NotNull,
    Unique,
    Check(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Integer(i64),
    Text(String),
    Real(f64),
    Null,
    CurrentTimestamp,
}

impl DefaultValue {
    fn as_sql(&self) -> String {
        match self {
            DefaultValue::Integer(i) => i.to_string(),
            DefaultValue::Real(f) => f.to_string(),
            DefaultValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
            DefaultValue::Null => "NULL".to_string(),
            DefaultValue::CurrentTimestamp => "CURRENT_TIMESTAMP".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub column: String,
    pub foreign_table: String,
    pub foreign_column: String,
    pub on_delete: ForeignKeyAction,
    pub on_update: ForeignKeyAction,
}

impl ForeignKey {
    pub fn new(
        column: impl Into<String>,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            foreign_table: foreign_table.into(),
            foreign_column: foreign_column.into(),
            on_delete: ForeignKeyAction::NoAction,
            on_update: ForeignKeyAction::NoAction,
        }
    }

    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = action;
        self
    }

    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = action;
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!(
            "FOREIGN KEY ({}) REFERENCES {}({})",
            self.column, self.foreign_table, self.foreign_column
        );
        if self.on_delete != ForeignKeyAction::NoAction {
            let _ = write!(sql, " ON DELETE {}", self.on_delete.as_sql());
        }
        if self.on_update != ForeignKeyAction::NoAction {
            let _ = write!(sql, " ON UPDATE {}", self.on_update.as_sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    NoAction,
    Cascade,
    SetNull,
    SetDefault,
    Restrict,
}

impl ForeignKeyAction {
    fn as_sql(&self) -> &'static str {
        match self {
            ForeignKeyAction::NoAction => "NO ACTION",
            ForeignKeyAction::Cascade => "CASCADE",
            ForeignKeyAction::SetNull => "SET NULL",
            ForeignKeyAction::SetDefault => "SET DEFAULT",
            ForeignKeyAction::Restrict => "RESTRICT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

impl IndexDefinition {
    pub fn new(name: impl Into<String>, table: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    fn to_sql(&self) -> String {
        format!(
            "CREATE {}INDEX {} ON {}({});",
            if self.unique { "UNIQUE " } else { "" },
            self.name,
            self.table,
            self.columns.join(", ")
        )
    }
}
