//! Canned read queries and their fixed-column text rendering.

use std::io::Write;

use crate::error::Result;
use crate::sqlite::{Database, ResultSet, SqlQuery};
use crate::value::Value;

/// One output column: a header (or label) and optional formatting hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: usize,
    /// Fixed decimals for real values.
    pub precision: Option<usize>,
}

impl Column {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            width: 0,
            precision: None,
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }

    fn format(&self, value: &Value, null: &str) -> String {
        match (value, self.precision) {
            (Value::Null, _) => null.to_string(),
            (Value::Real(r), Some(p)) => format!("{r:.p$}"),
            _ => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// Header row, rule, then one padded line per row.
    Table(Vec<Column>),
    /// One line per row of `Label: value` pairs.
    Labeled(Vec<Column>),
    /// First cell of the first row.
    Scalar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub query: SqlQuery,
    pub layout: Layout,
    pub empty_message: Option<String>,
}

impl Report {
    pub fn new(title: impl Into<String>, query: SqlQuery, layout: Layout) -> Self {
        Self {
            title: title.into(),
            query,
            layout,
            empty_message: None,
        }
    }

    pub fn table(title: impl Into<String>, sql: &str, columns: Vec<Column>) -> Self {
        Self::new(title, SqlQuery::new(sql), Layout::Table(columns))
    }

    pub fn labeled(title: impl Into<String>, sql: &str, columns: Vec<Column>) -> Self {
        Self::new(title, SqlQuery::new(sql), Layout::Labeled(columns))
    }

    pub fn scalar(title: impl Into<String>, sql: &str) -> Self {
        Self::new(title, SqlQuery::new(sql), Layout::Scalar)
    }

    pub fn when_empty(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    pub fn run(&self, db: &Database) -> Result<ResultSet> {
        db.query(&self.query)
    }
}

/// Writes reports as plain text.
#[derive(Debug, Clone)]
pub struct Renderer {
    null_placeholder: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("NULL")
    }
}

impl Renderer {
    pub fn new(null_placeholder: impl Into<String>) -> Self {
        Self {
            null_placeholder: null_placeholder.into(),
        }
    }

    pub fn render(&self, report: &Report, result: &ResultSet, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "--- {} ---", report.title)?;

        if result.is_empty() {
            if let Some(message) = &report.empty_message {
                writeln!(out, "{message}")?;
                return Ok(());
            }
        }

        match &report.layout {
            Layout::Table(columns) => self.render_table(columns, result, out)?,
            Layout::Labeled(columns) => self.render_labeled(columns, result, out)?,
            Layout::Scalar => {
                let cell = result.rows.first().and_then(|row| row.first());
                let text = cell.map_or(self.null_placeholder.clone(), |v| self.cell(v));
                writeln!(out, "{text}")?;
            }
        }
        Ok(())
    }

    fn render_table(&self, columns: &[Column], result: &ResultSet, out: &mut dyn Write) -> Result<()> {
        let columns = resolve(columns, result);
        let lines: Vec<Vec<String>> = result
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(row)
                    .map(|(c, v)| c.format(v, &self.null_placeholder))
                    .collect()
            })
            .collect();

        // Each column is as wide as its widest cell, never narrower than asked.
        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                lines
                    .iter()
                    .filter_map(|l| l.get(i))
                    .map(|s| s.chars().count())
                    .chain([c.width, c.header.chars().count()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = columns.iter().map(|c| c.header.clone()).collect();
        writeln!(out, "{}", join_padded(&header, &widths))?;
        let rule = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        writeln!(out, "{}", "-".repeat(rule))?;
        for line in &lines {
            writeln!(out, "{}", join_padded(line, &widths))?;
        }
        Ok(())
    }

    fn render_labeled(&self, columns: &[Column], result: &ResultSet, out: &mut dyn Write) -> Result<()> {
        let columns = resolve(columns, result);
        for row in &result.rows {
            let last = columns.len().min(row.len()).saturating_sub(1);
            let pairs: Vec<String> = columns
                .iter()
                .zip(row)
                .enumerate()
                .map(|(i, (c, v))| {
                    let text = c.format(v, &self.null_placeholder);
                    if i == last {
                        format!("{}: {text}", c.header)
                    } else {
                        format!("{}: {text:<width$}", c.header, width = c.width)
                    }
                })
                .collect();
            writeln!(out, "{}", pairs.join(" | "))?;
        }
        Ok(())
    }

    fn cell(&self, value: &Value) -> String {
        match value {
            Value::Null => self.null_placeholder.clone(),
            other => other.to_string(),
        }
    }
}

/// Declared columns, or the query's own column names when none are declared.
fn resolve(columns: &[Column], result: &ResultSet) -> Vec<Column> {
    if columns.is_empty() {
        result.columns.iter().map(Column::new).collect()
    } else {
        columns.to_vec()
    }
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .zip(widths.iter().copied())
        .enumerate()
        .map(|(i, (cell, width))| {
            if i == last {
                cell.clone()
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(columns: &[&str], rows: Vec<Vec<Value>>) -> ResultSet {
        ResultSet {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    fn render(renderer: &Renderer, report: &Report, rs: &ResultSet) -> String {
        let mut out = Vec::new();
        renderer.render(report, rs, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn table_pads_to_widest_cell() {
        let report = Report::table(
            "Employees",
            "SELECT 1",
            vec![Column::new("Name"), Column::new("Project")],
        );
        let rs = result(
            &["name", "project"],
            vec![
                vec!["Ivan Ivanov".into(), "Alpha".into()],
                vec!["Elena".into(), Value::Null],
            ],
        );
        let text = render(&Renderer::new("NONE"), &report, &rs);
        assert_eq!(
            text,
            "--- Employees ---\n\
             Name        | Project\n\
             ---------------------\n\
             Ivan Ivanov | Alpha\n\
             Elena       | NONE\n"
        );
    }

    #[test]
    fn labeled_rows_use_widths_and_precision() {
        let report = Report::labeled(
            "Totals",
            "SELECT 1",
            vec![Column::new("ID").width(3), Column::new("Sum").precision(2)],
        );
        let rs = result(&["id", "sum"], vec![vec![1.into(), 750.0.into()]]);
        let text = render(&Renderer::default(), &report, &rs);
        assert_eq!(text, "--- Totals ---\nID: 1   | Sum: 750.00\n");
    }

    #[test]
    fn empty_result_prints_message() {
        let report = Report::table("Missing", "SELECT 1", vec![]).when_empty("Nothing found.");
        let text = render(&Renderer::default(), &report, &ResultSet::default());
        assert_eq!(text, "--- Missing ---\nNothing found.\n");
    }

    #[test]
    fn scalar_prints_first_cell_or_placeholder() {
        let report = Report::scalar("Average", "SELECT 1");
        let rs = result(&["avg"], vec![vec![1412.5.into()]]);
        assert_eq!(
            render(&Renderer::default(), &report, &rs),
            "--- Average ---\n1412.5\n"
        );
        assert_eq!(
            render(&Renderer::default(), &report, &ResultSet::default()),
            "--- Average ---\nNULL\n"
        );
    }

    #[test]
    fn undeclared_columns_fall_back_to_query_names() {
        let report = Report::table("Raw", "SELECT 1", vec![]);
        let rs = result(&["a", "b"], vec![vec![1.into(), 2.into()]]);
        assert_eq!(
            render(&Renderer::default(), &report, &rs),
            "--- Raw ---\na | b\n-----\n1 | 2\n"
        );
    }
}
