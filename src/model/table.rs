//! Table types.

use serde::{Deserialize, Serialize};

/// A table with one header row and zero or more body rows.
///
/// Cell text is stored raw; inline formatting is applied by the consumer
/// when the table is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header cells
    pub header: Vec<String>,

    /// Body rows
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from a header row and body rows.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Get the number of columns (based on the header row).
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Get the number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get plain text representation, one tab-joined line per row.
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.header)
            .chain(self.rows.iter())
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        let table = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec!["1".to_string(), "2".to_string()]],
        );
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_plain_text() {
        let table = Table::new(
            vec!["name".to_string(), "age".to_string()],
            vec![vec!["alice".to_string(), "30".to_string()]],
        );
        assert_eq!(table.plain_text(), "name\tage\nalice\t30");
    }
}
