//! Logger configuration.
//!
//! [`LoggerConfig::load`] reads a TOML or JSON file (format chosen by
//! extension) layered on top of the embedded defaults. [`LoggerConfig::defaults`]
//! returns the same defaults without touching the filesystem.

use crate::LogLevel;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
console          = true
timestamp_format = "%Y-%m-%d %H:%M:%S%.3f"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Settings applied to each sink when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggerConfig {
    /// File that formatted lines are appended to. `None` disables file output.
    #[serde(default)]
    pub path_to_write: Option<PathBuf>,
    /// Levels that are dropped before formatting.
    #[serde(default)]
    pub disabled: Option<Vec<LogLevel>>,
    /// Echo formatted lines to stdout.
    #[serde(default = "default_console")]
    pub console: bool,
    /// chrono format string for the `{0}` timestamp slot (local time).
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_console() -> bool { true }
fn default_timestamp_format() -> String { "%Y-%m-%d %H:%M:%S%.3f".to_string() }

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            path_to_write: None,
            disabled: None,
            console: default_console(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl LoggerConfig {
    /// Load from `path`, layered on top of the built-in defaults. A missing
    /// file is not an error; the defaults are returned.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading logger config");
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Parse an inline TOML document layered on top of the defaults.
    pub fn from_toml(src: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path_to_write = Some(path.into());
        self
    }

    pub fn with_disabled(mut self, levels: impl IntoIterator<Item = LogLevel>) -> Self {
        self.disabled = Some(levels.into_iter().collect());
        self
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Disabled levels as a set (empty when unset).
    pub fn disabled_set(&self) -> HashSet<LogLevel> {
        self.disabled.iter().flatten().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
