//! Domain-specific assertion macros for kit harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which sink or cursor property was violated.

/// Assert that a sink's history holds exactly `expected`, oldest first.
///
/// ```rust
/// assert_history!(sink, ["Information a", "Information b"]);
/// ```
#[macro_export]
macro_rules! assert_history {
    ($sink:expr, $expected:expr) => {{
        let sink: &kit::LogSink = &$sink;
        let actual = sink.history().snapshot();
        let expected: Vec<String> = $expected.iter().map(|s| s.to_string()).collect();
        pretty_assertions::assert_eq!(
            actual,
            expected,
            "assert_history! failed for sink {:?}",
            sink.name()
        );
    }};
}

/// Assert that a cursor yields exactly `expected` columns from the current
/// row, then reports exhaustion.
///
/// ```rust
/// assert_columns!(cursor, ["x", "y", "z"]);
/// ```
#[macro_export]
macro_rules! assert_columns {
    ($cursor:expr, $expected:expr) => {{
        let cursor: &mut kit::DelimitedTextCursor = &mut $cursor;
        let mut actual = Vec::new();
        while let Some(column) = cursor.try_read_column() {
            actual.push(column.to_string());
        }
        let expected: Vec<String> = $expected.iter().map(|s| s.to_string()).collect();
        pretty_assertions::assert_eq!(
            actual,
            expected,
            "assert_columns! failed at line {} column {}",
            cursor.current_line(),
            cursor.current_column()
        );
        assert_eq!(
            cursor.read_column(),
            Err(kit::CursorError::NoMoreColumns),
            "assert_columns! expected exhaustion after the last column"
        );
    }};
}
