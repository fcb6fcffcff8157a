//! Result rendering
//!
//! Query replies are tables rendered as one tab-separated header line
//! followed by one line per record. Fields are written as stored; text
//! columns were encoded on the way in, so they hold no tabs or newlines.

use std::fmt;

use serde_json::{Map, Value};

/// A command's reply before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Mutation with nothing to report
    Done,
    /// A single value
    Text(String),
    /// Query rows
    Table(Table),
}

impl Reply {
    /// Renders the reply as protocol text (empty for [`Reply::Done`])
    pub fn render(&self) -> String {
        match self {
            Reply::Done => String::new(),
            Reply::Text(text) => text.clone(),
            Reply::Table(table) => table.render(),
        }
    }

    /// JSON form of the reply
    pub fn to_json(&self) -> Value {
        match self {
            Reply::Done => serde_json::json!({ "success": true }),
            Reply::Text(text) => serde_json::json!({ "result": text }),
            Reply::Table(table) => table.to_json(),
        }
    }
}

/// One field of a table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Int(i64),
    Text(String),
}

impl Cell {
    fn to_json(&self) -> Value {
        match self {
            Cell::Int(n) => Value::from(*n),
            Cell::Text(text) => Value::String(text.clone()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Cell::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

/// Rows of a query with a fixed column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: &[&'static str]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Appends a record. Must have one field per column.
    pub fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Header line plus one line per record, each ending in `\n`
    pub fn render(&self) -> String {
        let mut out = self.columns.join("\t");
        out.push('\n');
        for row in &self.rows {
            let fields: Vec<String> = row.iter().map(Cell::to_string).collect();
            out.push_str(&fields.join("\t"));
            out.push('\n');
        }
        out
    }

    /// Records as an array of objects keyed by column name. Integer
    /// fields stay JSON numbers.
    pub fn to_json(&self) -> Value {
        let records = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(column, field)| (column.to_string(), field.to_json()))
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(records)
    }
}
