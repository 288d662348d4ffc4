use serde::{Deserialize, Serialize};
use serde_json::Value;

static NULL: Value = Value::Null;

/// Rectangular table exchanged with the spreadsheet reader/writer.
///
/// Cells are raw JSON values; typing happens once in
/// [`ComponentRecord::from_row`](crate::model::record::ComponentRecord::from_row).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header, exact match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `(row, col)`; short rows read as null.
    pub fn cell(&self, row: usize, col: usize) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&NULL)
    }

    /// Writes `values` into column `name`, appending the column when absent.
    ///
    /// Row `i` receives `values[i]`. Rows are first fitted to the header:
    /// cells past it are dropped and short rows are padded with null.
    pub fn with_column(mut self, name: &str, values: Vec<String>) -> Self {
        let header_width = self.columns.len();
        let col = match self.column_index(name) {
            Some(i) => i,
            None => {
                self.columns.push(name.to_string());
                self.columns.len() - 1
            }
        };
        let width = self.columns.len();

        for (row, value) in self.rows.iter_mut().zip(values) {
            row.truncate(header_width);
            row.resize(width, Value::Null);
            row[col] = Value::String(value);
        }
        self
    }
}
