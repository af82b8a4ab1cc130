//! kit — shared utilities.
//!
//! Two independent components, re-exported here so that integration tests
//! and hosts can depend on a single crate:
//!
//! ```text
//! kit-log:  ConfigWatch ──► LoggerProvider ──► LogSink ──► LogHistory
//! kit-csv:  source text ──► DelimitedTextCursor ──► rows ──► columns
//! ```
//!
//! Nothing flows between the two.

pub use kit_csv as csv;
pub use kit_log as log;

pub use kit_core::{ErrorInfo, EventId, LogLevel, LoggerConfig};
pub use kit_csv::{CursorError, DelimitedTextCursor};
pub use kit_log::{
    type_label, ConfigWatch, LogEvent, LogHistory, LogSink, LoggerProvider, ScopeHandle,
    TemplateError,
};
