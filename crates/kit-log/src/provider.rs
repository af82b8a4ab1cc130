//! Provider — creates and caches one [`LogSink`] per category.
//!
//! All sinks from one provider share a single [`LogHistory`] and therefore a
//! single output lock. The provider follows a [`ConfigWatch`]: a published
//! config replaces the provider's config, and sinks created afterwards use
//! it. Existing sinks keep the settings they were created with.

use crate::history::LogHistory;
use crate::sink::LogSink;
use crate::watch::{ConfigWatch, Subscription};
use kit_core::LoggerConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

/// Category name of the provider-wide shared sink.
pub const SHARED_CATEGORY: &str = "Shared";

pub struct LoggerProvider {
    config: Arc<RwLock<Arc<LoggerConfig>>>,
    history: Arc<LogHistory>,
    loggers: Mutex<HashMap<String, Arc<LogSink>>>,
    shared: OnceLock<Arc<LogSink>>,
    _subscription: Subscription,
}

impl LoggerProvider {
    /// Provider with a fresh default-capacity history.
    pub fn new(watch: &ConfigWatch) -> Self {
        Self::with_history(watch, Arc::new(LogHistory::default()))
    }

    pub fn with_history(watch: &ConfigWatch, history: Arc<LogHistory>) -> Self {
        let config = Arc::new(RwLock::new(Arc::new(watch.current())));
        let target = Arc::clone(&config);
        let subscription = watch.subscribe(move |updated| {
            tracing::debug!(?updated, "logger config replaced");
            *target.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(updated.clone());
        });
        Self {
            config,
            history,
            loggers: Mutex::new(HashMap::new()),
            shared: OnceLock::new(),
            _subscription: subscription,
        }
    }

    /// Sink for `category`, created on first use. Names are compared
    /// case-insensitively.
    pub fn create_logger(&self, category: &str) -> Arc<LogSink> {
        let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        let sink = loggers.entry(category.to_lowercase()).or_insert_with(|| {
            tracing::debug!(category, "creating sink");
            Arc::new(LogSink::from_config(category, &self.config(), Arc::clone(&self.history)))
        });
        Arc::clone(sink)
    }

    /// The provider-wide shared sink. Not part of the category cache.
    pub fn shared(&self) -> Arc<LogSink> {
        Arc::clone(self.shared.get_or_init(|| {
            Arc::new(LogSink::from_config(
                SHARED_CATEGORY,
                &self.config(),
                Arc::clone(&self.history),
            ))
        }))
    }

    /// Config that the next created sink will use.
    pub fn config(&self) -> Arc<LoggerConfig> {
        Arc::clone(&self.config.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn history(&self) -> &Arc<LogHistory> {
        &self.history
    }

    /// Number of cached categories.
    pub fn len(&self) -> usize {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
