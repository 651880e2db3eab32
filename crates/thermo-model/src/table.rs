#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Wide-format source table: one row per time step, one column per subject.
///
/// Row position is the time coordinate. Rows may be shorter than the header;
/// the trailing cells of such a row are missing rather than empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WideTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl WideTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw cell text, or `None` when the row does not reach `column`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// Subject columns as `(column index, name)`, skipping the reserved
    /// index column when one is configured (matched case-insensitively).
    pub fn subject_columns(&self, index_column: Option<&str>) -> Vec<(usize, &str)> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, name)| match index_column {
                Some(reserved) => !name.eq_ignore_ascii_case(reserved),
                None => true,
            })
            .map(|(idx, name)| (idx, name.as_str()))
            .collect()
    }
}
