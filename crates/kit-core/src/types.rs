//! Core types for kit-core.
//!
//! This module defines the values that travel through a log call: the
//! [`LogLevel`] severity, the [`EventId`] that tags an entry, and the
//! [`ErrorInfo`] snapshot of an error attached to an entry.

use serde::Deserialize;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Log severity level. Ordered from least to most severe; `None` sorts last
/// and is never emitted by well-behaved callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
    None,
}

impl LogLevel {
    /// Every level in ascending order.
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Information,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::None,
    ];

    /// Symbolic name, as written into formatted lines.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "Trace",
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Critical => "Critical",
            LogLevel::None => "None",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`LogLevel`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level {0:?}")]
pub struct UnknownLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    /// Case-insensitive. Accepts the symbolic names plus the short forms
    /// `info`, `warn` and `fatal`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "information" | "info" => Ok(LogLevel::Information),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" | "fatal" => Ok(LogLevel::Critical),
            "none" => Ok(LogLevel::None),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = UnknownLevel;

    fn try_from(value: String) -> Result<Self, UnknownLevel> {
        value.parse()
    }
}

/// Identifies a log event. Displays as its name when one is set, otherwise
/// as the numeric id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EventId {
    pub id: i32,
    pub name: Option<String>,
}

impl EventId {
    pub fn new(id: i32) -> Self {
        Self { id, name: None }
    }

    pub fn named(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}

impl From<i32> for EventId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Snapshot of an error attached to a log entry.
///
/// Rendered through the sink's exception template as message, inner message
/// (or `"Empty"`), and stack trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    /// Message of the first error in the `source()` chain.
    pub inner: Option<String>,
    pub stack_trace: String,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_inner(mut self, inner: impl Into<String>) -> Self {
        self.inner = Some(inner.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = stack_trace.into();
        self
    }

    /// Capture an error's message and first source. The stack trace is the
    /// caller's backtrace when `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` enable
    /// capture, and empty otherwise.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let backtrace = Backtrace::capture();
        let stack_trace = match backtrace.status() {
            BacktraceStatus::Captured => backtrace.to_string(),
            _ => String::new(),
        };
        Self {
            message: err.to_string(),
            inner: err.source().map(|source| source.to_string()),
            stack_trace,
        }
    }

    /// The inner message, or `"Empty"` when there is none.
    pub fn inner_or_empty(&self) -> &str {
        self.inner.as_deref().unwrap_or("Empty")
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
