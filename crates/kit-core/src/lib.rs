//! kit-core — shared types and configuration for kit.
//!
//! The log sink in `kit-log` consumes everything defined here; `kit-csv` is
//! independent of this crate.

pub mod config;
pub mod types;

pub use config::LoggerConfig;
pub use types::{ErrorInfo, EventId, LogLevel, UnknownLevel};
