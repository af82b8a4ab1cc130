//! Test builders — ergonomic constructors for sinks and hook recorders.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use kit::{EventId, LogEvent, LogHistory, LogLevel, LogSink, LoggerConfig};
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// SinkBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`LogSink`] fixtures. Console echo is off and the
/// format template is `{1} {4}` (level and message) unless overridden, so
/// lines are deterministic.
///
/// # Example
///
/// ```rust
/// let sink = SinkBuilder::new("orders")
///     .capacity(8)
///     .disabled([LogLevel::Debug])
///     .build();
/// ```
pub struct SinkBuilder {
    name: String,
    config: LoggerConfig,
    history: Option<Arc<LogHistory>>,
    capacity: i64,
    format: Option<String>,
}

impl SinkBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: LoggerConfig::default().with_console(false),
            history: None,
            capacity: 1024,
            format: Some("{1} {4}".to_string()),
        }
    }

    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn history(mut self, history: Arc<LogHistory>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn disabled(mut self, levels: impl IntoIterator<Item = LogLevel>) -> Self {
        self.config = self.config.with_disabled(levels);
        self
    }

    pub fn file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config = self.config.with_path(path);
        self
    }

    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = Some(template.into());
        self
    }

    /// Keep the production default line format.
    pub fn default_format(mut self) -> Self {
        self.format = None;
        self
    }

    pub fn build(self) -> LogSink {
        let history = self
            .history
            .unwrap_or_else(|| Arc::new(LogHistory::new(self.capacity)));
        let sink = LogSink::from_config(self.name, &self.config, history);
        if let Some(format) = self.format {
            sink.set_format_template(format);
        }
        sink
    }
}

// ---------------------------------------------------------------------------
// Hook recorder
// ---------------------------------------------------------------------------

/// One hook invocation as observed by a [`HookRecorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observed {
    pub phase: &'static str,
    pub level: LogLevel,
    pub message: String,
    pub had_error: bool,
    /// History length at the moment the hook ran.
    pub history_len: usize,
}

/// Records every before/after hook call on a sink, in order.
#[derive(Clone, Default)]
pub struct HookRecorder {
    calls: Arc<Mutex<Vec<Observed>>>,
}

impl HookRecorder {
    pub fn attach(sink: &LogSink) -> Self {
        let recorder = Self::default();
        for phase in ["before", "after"] {
            let calls = Arc::clone(&recorder.calls);
            let history = Arc::clone(sink.history());
            let hook = move |event: &LogEvent<'_>| {
                calls.lock().unwrap().push(Observed {
                    phase,
                    level: event.level,
                    message: event.message.to_string(),
                    had_error: event.error.is_some(),
                    history_len: history.len(),
                });
            };
            if phase == "before" {
                sink.on_before_log(hook);
            } else {
                sink.on_after_log(hook);
            }
        }
        recorder
    }

    pub fn calls(&self) -> Vec<Observed> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, phase: &str) -> usize {
        self.calls().iter().filter(|c| c.phase == phase).count()
    }
}

// ---------------------------------------------------------------------------
// Convenience
// ---------------------------------------------------------------------------

/// Log an INFO line with event id 1 under scope `Test`.
pub fn log_info(sink: &LogSink, message: &str) {
    sink.log(LogLevel::Information, message, &EventId::new(1), "Test", None)
        .unwrap();
}

/// Log `message` at `level` with event id 1 under scope `Test`.
pub fn log_at(sink: &LogSink, level: LogLevel, message: &str) {
    sink.log(level, message, &EventId::new(1), "Test", None).unwrap();
}
