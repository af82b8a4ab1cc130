//! Config watch — holds the current [`LoggerConfig`] and notifies subscribers
//! when a new one is published.

use kit_core::LoggerConfig;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

type Listener = Arc<dyn Fn(&LoggerConfig) + Send + Sync>;

struct WatchInner {
    current: RwLock<LoggerConfig>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

/// Cloneable handle; clones share the same config and subscriber list.
#[derive(Clone)]
pub struct ConfigWatch {
    inner: Arc<WatchInner>,
}

/// Keeps a callback registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    watch: Weak<WatchInner>,
}

impl ConfigWatch {
    pub fn new(initial: LoggerConfig) -> Self {
        Self {
            inner: Arc::new(WatchInner {
                current: RwLock::new(initial),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn current(&self) -> LoggerConfig {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register `callback` to run on every [`publish`](Self::publish).
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LoggerConfig) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners().push((id, Arc::new(callback)));
        Subscription {
            id,
            watch: Arc::downgrade(&self.inner),
        }
    }

    /// Replace the current config and notify subscribers. Callbacks run on
    /// the calling thread, after the new config is visible through
    /// [`current`](Self::current).
    pub fn publish(&self, config: LoggerConfig) {
        *self
            .inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = config.clone();
        let snapshot: Vec<Listener> = self
            .listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(&config);
        }
    }

    /// Load `path` and publish the result. On error nothing is published.
    pub fn reload(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let config = LoggerConfig::load(path)?;
        self.publish(config);
        Ok(())
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners().len()
    }

    fn listeners(&self) -> std::sync::MutexGuard<'_, Vec<(u64, Listener)>> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ConfigWatch {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.watch.upgrade() {
            inner
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
        }
    }
}
