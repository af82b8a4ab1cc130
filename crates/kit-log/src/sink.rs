//! Sink — formats, records, and persists one log line per call.
//!
//! Every call to [`LogSink::log`] runs the same sequence:
//!
//! ```text
//! before hooks ──► level filter ──► format ──► [history lock: console, history, latest, file] ──► after hooks
//! ```
//!
//! The before hooks run even for disabled levels; everything after the filter
//! is skipped for them. The lock belongs to the shared [`LogHistory`], so
//! sinks that share a history never interleave their output.

use crate::history::LogHistory;
use crate::scope::{ScopeHandle, OBJECT_SCOPE};
use crate::template::{self, TemplateError, DEFAULT_EXCEPTION_FORMAT, DEFAULT_FORMAT};
use kit_core::{ErrorInfo, EventId, LogLevel, LoggerConfig};
use std::collections::HashSet;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// What hooks observe for each call.
#[derive(Debug, Clone, Copy)]
pub struct LogEvent<'a> {
    pub level: LogLevel,
    /// The message before formatting.
    pub message: &'a str,
    pub error: Option<&'a ErrorInfo>,
}

/// Callback registered with [`LogSink::on_before_log`] or [`LogSink::on_after_log`].
///
/// Hooks run outside the sink's lock and may be called from several threads
/// at once.
pub type Hook = Arc<dyn Fn(&LogEvent<'_>) + Send + Sync>;

#[derive(Debug, Clone)]
struct SinkOptions {
    disabled: HashSet<LogLevel>,
    format_template: String,
    exception_template: String,
    timestamp_format: String,
    console: bool,
}

impl SinkOptions {
    fn from_config(config: &LoggerConfig) -> Self {
        Self {
            disabled: config.disabled_set(),
            format_template: DEFAULT_FORMAT.to_string(),
            exception_template: DEFAULT_EXCEPTION_FORMAT.to_string(),
            timestamp_format: config.timestamp_format.clone(),
            console: config.console,
        }
    }

    fn render_exception(&self, error: &ErrorInfo) -> Result<String, TemplateError> {
        template::render(
            &self.exception_template,
            &[&error.message, &error.inner_or_empty(), &error.stack_trace],
        )
    }
}

#[derive(Debug, Default)]
struct Latest {
    formatted: String,
    raw: String,
}

/// Append-only log sink backed by a shared [`LogHistory`].
pub struct LogSink {
    name: String,
    history: Arc<LogHistory>,
    options: RwLock<SinkOptions>,
    latest: Mutex<Latest>,
    file: Option<File>,
    file_path: Option<PathBuf>,
    before: RwLock<Vec<Hook>>,
    after: RwLock<Vec<Hook>>,
}

impl LogSink {
    /// A sink with default settings and no file output.
    pub fn new(name: impl Into<String>, history: Arc<LogHistory>) -> Self {
        Self::from_config(name, &LoggerConfig::default(), history)
    }

    /// A sink with default settings that appends to `path`.
    pub fn with_file(name: impl Into<String>, path: impl AsRef<Path>, history: Arc<LogHistory>) -> Self {
        Self::from_config(name, &LoggerConfig::default().with_path(path.as_ref()), history)
    }

    /// Build a sink from `config`. If `config.path_to_write` cannot be opened
    /// for appending, the sink still works but writes no file.
    pub fn from_config(name: impl Into<String>, config: &LoggerConfig, history: Arc<LogHistory>) -> Self {
        let name = name.into();
        let file = config.path_to_write.as_deref().and_then(|path| open_append(&name, path));
        let file_path = file.as_ref().and(config.path_to_write.clone());
        Self {
            name,
            history,
            options: RwLock::new(SinkOptions::from_config(config)),
            latest: Mutex::new(Latest::default()),
            file,
            file_path,
            before: RwLock::new(Vec::new()),
            after: RwLock::new(Vec::new()),
        }
    }

    // -----------------------------------------------------------------------
    // Logging
    // -----------------------------------------------------------------------

    /// Format and record one line.
    ///
    /// Returns an error when a template is malformed or a slot fails to
    /// format (an invalid timestamp format, for one); in that case the
    /// before hooks have run and nothing was recorded.
    pub fn log(
        &self,
        level: LogLevel,
        message: &str,
        event_id: &EventId,
        scope: &str,
        error: Option<&ErrorInfo>,
    ) -> Result<(), TemplateError> {
        let event = LogEvent { level, message, error };
        fire(&self.before, &event);

        let (formatted, console) = {
            let options = self.options();
            if options.disabled.contains(&level) {
                return Ok(());
            }
            let timestamp = chrono::Local::now().format(&options.timestamp_format);
            let mut formatted = template::render(
                &options.format_template,
                &[&timestamp, &level, &scope, event_id, &message],
            )?;
            if let Some(error) = error {
                formatted.push_str(&options.render_exception(error)?);
            }
            (formatted, options.console)
        };

        {
            let mut history = self.history.lock();
            if console {
                let mut stdout = io::stdout().lock();
                let _ = stdout.write_all(formatted.as_bytes());
                let _ = stdout.flush();
            }
            history.push(formatted.clone());
            {
                let mut latest = lock(&self.latest);
                latest.raw = message.to_string();
                latest.formatted = formatted.clone();
            }
            self.write_raw(&formatted);
        }

        fire(&self.after, &event);
        Ok(())
    }

    /// Log an error on its own: the rendered exception template becomes the
    /// message.
    pub fn log_error(
        &self,
        level: LogLevel,
        event_id: &EventId,
        scope: &str,
        error: &ErrorInfo,
    ) -> Result<(), TemplateError> {
        let compiled = self.options().render_exception(error)?;
        self.log(level, &compiled, event_id, scope, None)
    }

    /// Obtain the message from `formatter`. Without an error the formatted
    /// message is logged; with one, the call takes the [`log_error`] path.
    ///
    /// [`log_error`]: LogSink::log_error
    pub fn log_with<F>(
        &self,
        level: LogLevel,
        event_id: &EventId,
        scope: &str,
        error: Option<&ErrorInfo>,
        formatter: F,
    ) -> Result<(), TemplateError>
    where
        F: FnOnce(&str, Option<&ErrorInfo>) -> String,
    {
        let message = formatter(scope, error);
        match error {
            None => self.log(level, &message, event_id, scope, None),
            Some(error) => self.log_error(level, event_id, scope, error),
        }
    }

    /// Render `message` as a positional template over `args`, then log it
    /// under the `Object` scope label.
    pub fn log_args(
        &self,
        level: LogLevel,
        event_id: &EventId,
        message: &str,
        args: &[&dyn fmt::Display],
        error: Option<&ErrorInfo>,
    ) -> Result<(), TemplateError> {
        let message = template::render(message, args)?;
        self.log(level, &message, event_id, OBJECT_SCOPE, error)
    }

    /// Append `message` to the log file as UTF-8. Does nothing without a file;
    /// write failures are dropped.
    pub fn write_raw(&self, message: &str) {
        if let Some(mut file) = self.file.as_ref() {
            if let Err(err) = file.write_all(message.as_bytes()) {
                tracing::debug!(sink = %self.name, error = %err, "log file write failed");
            }
        }
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        !self.options().disabled.contains(&level)
    }

    /// Start a scope. The state is not retained.
    pub fn begin_scope<S>(&self, _state: S) -> ScopeHandle {
        ScopeHandle::new()
    }

    // -----------------------------------------------------------------------
    // Hooks
    // -----------------------------------------------------------------------

    /// Register a hook that runs at the start of every call, including calls
    /// for disabled levels.
    pub fn on_before_log<F>(&self, hook: F)
    where
        F: Fn(&LogEvent<'_>) + Send + Sync + 'static,
    {
        write(&self.before).push(Arc::new(hook));
    }

    /// Register a hook that runs after a line has been recorded.
    pub fn on_after_log<F>(&self, hook: F)
    where
        F: Fn(&LogEvent<'_>) + Send + Sync + 'static,
    {
        write(&self.after).push(Arc::new(hook));
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub fn set_disabled_levels(&self, levels: impl IntoIterator<Item = LogLevel>) {
        write(&self.options).disabled = levels.into_iter().collect();
    }

    /// Disabled levels in ascending order.
    pub fn disabled_levels(&self) -> Vec<LogLevel> {
        let mut levels: Vec<_> = self.options().disabled.iter().copied().collect();
        levels.sort();
        levels
    }

    /// Slots: `{0}` timestamp, `{1}` level, `{2}` scope, `{3}` event id, `{4}` message.
    pub fn set_format_template(&self, template: impl Into<String>) {
        write(&self.options).format_template = template.into();
    }

    pub fn format_template(&self) -> String {
        self.options().format_template.clone()
    }

    /// Slots: `{0}` message, `{1}` inner message or `Empty`, `{2}` stack trace.
    pub fn set_exception_template(&self, template: impl Into<String>) {
        write(&self.options).exception_template = template.into();
    }

    pub fn exception_template(&self) -> String {
        self.options().exception_template.clone()
    }

    pub fn set_timestamp_format(&self, format: impl Into<String>) {
        write(&self.options).timestamp_format = format.into();
    }

    pub fn set_console_echo(&self, console: bool) {
        write(&self.options).console = console;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn history(&self) -> &Arc<LogHistory> {
        &self.history
    }

    /// Path of the open log file, if file output is active.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// The last recorded line, after formatting.
    pub fn latest_formatted(&self) -> String {
        lock(&self.latest).formatted.clone()
    }

    /// The last recorded message, before formatting.
    pub fn latest_raw(&self) -> String {
        lock(&self.latest).raw.clone()
    }

    fn options(&self) -> RwLockReadGuard<'_, SinkOptions> {
        self.options.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("name", &self.name)
            .field("file_path", &self.file_path)
            .field("options", &*self.options())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_append(name: &str, path: &Path) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(err) => {
            tracing::warn!(
                sink = %name,
                path = %path.display(),
                error = %err,
                "cannot open log file; continuing without file output"
            );
            None
        }
    }
}

/// Snapshot the hook list so a hook can register hooks without deadlocking.
fn fire(hooks: &RwLock<Vec<Hook>>, event: &LogEvent<'_>) {
    let snapshot: Vec<Hook> = hooks.read().unwrap_or_else(PoisonError::into_inner).clone();
    for hook in snapshot {
        hook(event);
    }
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
