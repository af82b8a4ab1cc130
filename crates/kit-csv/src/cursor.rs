//! Forward-only cursor over delimiter-separated text.
//!
//! The source is split into rows on `\n` (after `\r\n` is normalised) and each
//! row is split into columns on the delimiter when it is read. Reads only move
//! forward, and only on success.
//!
//! An empty row or column reads as "no more data": the `try_read_*` methods
//! return `None` on it and do not step past it. Everything after an empty
//! row in the same source is therefore unreachable by reading alone; use
//! [`DelimitedTextCursor::set_current_line`] to jump over it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("source text is empty")]
    EmptySource,

    #[error("{field} {value} is out of range (max {max})")]
    OutOfRange {
        field: &'static str,
        value: usize,
        max: usize,
    },

    #[error("No more row left.")]
    NoMoreRows,

    #[error("No more column left.")]
    NoMoreColumns,
}

/// Row and column cursor over a delimited source.
///
/// Invariants: `current_line <= rows.len()` and
/// `current_column <= current_row.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedTextCursor {
    rows: Vec<String>,
    delimiter: String,
    current_row: Vec<String>,
    current_line: usize,
    current_column: usize,
}

impl DelimitedTextCursor {
    /// Split `source` into rows and load the first row. Both cursors start
    /// at zero, so the first [`try_read_row`](Self::try_read_row) returns row 0.
    pub fn new(source: &str, delimiter: impl Into<String>) -> Result<Self, CursorError> {
        if source.is_empty() {
            return Err(CursorError::EmptySource);
        }
        let delimiter = delimiter.into();
        let rows: Vec<String> = source.replace("\r\n", "\n").split('\n').map(str::to_owned).collect();
        let current_row = split_row(&rows[0], &delimiter);
        Ok(Self {
            rows,
            delimiter,
            current_row,
            current_line: 0,
            current_column: 0,
        })
    }

    /// Comma-delimited cursor.
    pub fn comma(source: &str) -> Result<Self, CursorError> {
        Self::new(source, ",")
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Load the row under the cursor and step past it. `None` when the rows
    /// are exhausted or the row is empty; the cursor does not move then.
    pub fn try_read_row(&mut self) -> Option<&str> {
        let line = self.current_line;
        let row = self.rows.get(line)?;
        if row.is_empty() {
            return None;
        }
        self.current_row = split_row(row, &self.delimiter);
        self.current_line += 1;
        self.current_column = 0;
        Some(&self.rows[line])
    }

    /// Return the column under the cursor and step past it. `None` when the
    /// row is exhausted or the column is empty; the cursor does not move then.
    pub fn try_read_column(&mut self) -> Option<&str> {
        let column = self.current_column;
        if self.current_row.get(column)?.is_empty() {
            return None;
        }
        self.current_column += 1;
        Some(&self.current_row[column])
    }

    pub fn read_row(&mut self) -> Result<&str, CursorError> {
        self.try_read_row().ok_or(CursorError::NoMoreRows)
    }

    pub fn read_column(&mut self) -> Result<&str, CursorError> {
        self.try_read_column().ok_or(CursorError::NoMoreColumns)
    }

    // -----------------------------------------------------------------------
    // Cursor positioning
    // -----------------------------------------------------------------------

    /// Index of the next row to read.
    pub fn current_line(&self) -> usize {
        self.current_line
    }

    /// Move to row `line` and read it. `line == rows.len()` is allowed and
    /// leaves the cursor exhausted.
    pub fn set_current_line(&mut self, line: usize) -> Result<(), CursorError> {
        if line > self.rows.len() {
            return Err(CursorError::OutOfRange {
                field: "current_line",
                value: line,
                max: self.rows.len(),
            });
        }
        self.current_line = line;
        self.try_read_row();
        Ok(())
    }

    /// Index of the next column to read in the current row.
    pub fn current_column(&self) -> usize {
        self.current_column
    }

    pub fn set_current_column(&mut self, column: usize) -> Result<(), CursorError> {
        if column > self.current_row.len() {
            return Err(CursorError::OutOfRange {
                field: "current_column",
                value: column,
                max: self.current_row.len(),
            });
        }
        self.current_column = column;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Rows and delimiter
    // -----------------------------------------------------------------------

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Replace the rows, reset both cursors, and read the first row.
    ///
    /// When there is no first row, or it is blank, no row is read:
    /// `current_line` stays 0 and `current_row` keeps the previous columns.
    pub fn set_rows(&mut self, rows: Vec<String>) {
        self.rows = rows;
        self.current_line = 0;
        self.current_column = 0;
        self.try_read_row();
    }

    /// Columns of the most recently loaded row.
    pub fn current_row(&self) -> &[String] {
        &self.current_row
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Takes effect the next time a row is loaded.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) {
        self.delimiter = delimiter.into();
    }
}

/// Plain substring split that keeps empty fields. An empty delimiter leaves
/// the row whole.
fn split_row(row: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![row.to_owned()];
    }
    row.split(delimiter).map(str::to_owned).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
