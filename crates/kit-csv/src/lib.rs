//! kit-csv — cursor-based reader for delimiter-separated text.
//!
//! Splitting only: there is no quoting or escaping, so a delimiter inside a
//! field always ends the field.

pub mod cursor;

pub use cursor::{CursorError, DelimitedTextCursor};
