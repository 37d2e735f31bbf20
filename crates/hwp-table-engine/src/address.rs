//! Table coordinates and payloads.
//!
//! All coordinates are 1-based and relative to the upper-left cell of a
//! table, which is the only cell the automation surface can jump to.

use std::fmt;

use serde_json::Value;

use crate::error::{EngineError, Result};

/// A cell position inside a table. Both components are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    row: u32,
    col: u32,
}

impl CellAddress {
    /// Create an address, rejecting zero components.
    pub fn new(row: u32, col: u32) -> Result<Self> {
        if row == 0 || col == 0 {
            return Err(EngineError::invalid_input(format!(
                "cell address ({row}, {col}) must have row and column >= 1"
            )));
        }
        Ok(Self { row, col })
    }

    /// The table's upper-left cell.
    pub const fn origin() -> Self {
        Self { row: 1, col: 1 }
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn col(&self) -> u32 {
        self.col
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Size of a table to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableDimensions {
    rows: u32,
    cols: u32,
}

impl TableDimensions {
    /// Create dimensions, rejecting zero rows or columns.
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::invalid_input(format!(
                "table dimensions {rows}x{cols} must have rows and columns >= 1"
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }
}

impl fmt::Display for TableDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A rectangular block of cells to merge.
///
/// The fields are public so a range can be described before it is checked;
/// [`MergeRange::validate`] runs before any primitive is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl MergeRange {
    /// Create a range, rejecting one whose end is above or left of its start.
    pub fn new(start: CellAddress, end: CellAddress) -> Result<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start.row > self.end.row || self.start.col > self.end.col {
            return Err(EngineError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Number of rows spanned (at least 1 once validated).
    pub fn height(&self) -> u32 {
        self.end.row.saturating_sub(self.start.row) + 1
    }

    /// Number of columns spanned (at least 1 once validated).
    pub fn width(&self) -> u32 {
        self.end.col.saturating_sub(self.start.col) + 1
    }
}

/// Rows of cell text. Rows may have different lengths; only the cells
/// present are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Parse a JSON array of arrays.
    ///
    /// Strings are taken as is, numbers and booleans keep their JSON text,
    /// and `null` becomes an empty cell.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidData(format!("not valid JSON: {e}")))?;
        let Value::Array(rows) = value else {
            return Err(EngineError::InvalidData(
                "expected an array of rows".to_string(),
            ));
        };

        let mut parsed = Vec::with_capacity(rows.len());
        for (r, row) in rows.into_iter().enumerate() {
            let Value::Array(cells) = row else {
                return Err(EngineError::InvalidData(format!(
                    "row {} is not an array",
                    r + 1
                )));
            };
            let mut texts = Vec::with_capacity(cells.len());
            for (c, cell) in cells.into_iter().enumerate() {
                let text = match cell {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Array(_) | Value::Object(_) => {
                        return Err(EngineError::InvalidData(format!(
                            "cell ({}, {}) is not a scalar",
                            r + 1,
                            c + 1
                        )));
                    }
                };
                texts.push(text);
            }
            parsed.push(texts);
        }
        Ok(Self { rows: parsed })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

impl<S: Into<String>> FromIterator<Vec<S>> for TableData {
    fn from_iter<I: IntoIterator<Item = Vec<S>>>(iter: I) -> Self {
        Self {
            rows: iter
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_address_rejects_zero() {
        assert!(CellAddress::new(0, 1).is_err());
        assert!(CellAddress::new(1, 0).is_err());
        let addr = CellAddress::new(2, 3).unwrap();
        assert_eq!((addr.row(), addr.col()), (2, 3));
        assert_eq!(CellAddress::origin(), CellAddress::new(1, 1).unwrap());
    }

    #[test]
    fn test_dimensions_reject_zero() {
        assert!(matches!(
            TableDimensions::new(0, 3),
            Err(EngineError::InvalidInput(_))
        ));
        assert_eq!(TableDimensions::new(1, 1).unwrap().to_string(), "1x1");
    }

    #[test]
    fn test_merge_range_validation() {
        let a = CellAddress::new(3, 2).unwrap();
        let b = CellAddress::new(1, 1).unwrap();
        assert!(matches!(
            MergeRange::new(a, b),
            Err(EngineError::InvalidRange { .. })
        ));

        let range = MergeRange::new(b, a).unwrap();
        assert_eq!(range.height(), 3);
        assert_eq!(range.width(), 2);

        // row ordered but columns inverted
        let c = CellAddress::new(1, 4).unwrap();
        let d = CellAddress::new(2, 2).unwrap();
        assert!(MergeRange::new(c, d).is_err());
    }

    #[test]
    fn test_table_data_from_json() {
        let data = TableData::from_json(r#"[["Name", "Age"], ["Kim", 31, true], [null]]"#).unwrap();
        assert_eq!(data.row_count(), 3);
        assert_eq!(data.rows()[1], vec!["Kim", "31", "true"]);
        assert_eq!(data.rows()[2], vec![""]);
        assert_eq!(data.cell_count(), 6);
    }

    #[test]
    fn test_table_data_from_json_rejects_bad_shapes() {
        assert!(matches!(
            TableData::from_json("{\"a\": 1}"),
            Err(EngineError::InvalidData(_))
        ));
        assert!(TableData::from_json("[1, 2]").is_err());
        assert!(TableData::from_json("[[[1]]]").is_err());
        assert!(TableData::from_json("not json").is_err());
    }

    #[test]
    fn test_table_data_from_iter() {
        let data: TableData = vec![vec!["a", "b"], vec!["c"]].into_iter().collect();
        assert_eq!(data.rows()[0], vec!["a".to_string(), "b".to_string()]);
        assert!(!data.is_empty());
        assert!(TableData::default().is_empty());
    }
}
