//! kit-log — bounded, thread-safe log sink.
//!
//! # Architecture
//!
//! ```text
//! ConfigWatch ──► LoggerProvider ──► LogSink (one per category) ──► LogHistory (shared)
//!                                        │
//!                                        └──► stdout / append-only file
//! ```
//!
//! A host wires [`LogSink`] into whatever logging facade it uses. The sink
//! itself exposes `log`, `is_enabled`, and `begin_scope`.

pub mod history;
pub mod provider;
pub mod scope;
pub mod sink;
pub mod template;
pub mod watch;

pub use history::LogHistory;
pub use provider::LoggerProvider;
pub use scope::{type_label, ScopeHandle};
pub use sink::{Hook, LogEvent, LogSink};
pub use template::TemplateError;
pub use watch::{ConfigWatch, Subscription};

pub use kit_core::{ErrorInfo, EventId, LogLevel, LoggerConfig};
