//! Scope handles and scope labels.

/// Label used when a call has no state type of its own.
pub const OBJECT_SCOPE: &str = "Object";

/// Handle returned by [`LogSink::begin_scope`](crate::LogSink::begin_scope).
///
/// It only records whether it has been released; no scope stack is kept and
/// releasing has no effect on logging.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScopeHandle {
    released: bool,
}

impl ScopeHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&mut self) {
        self.released = true;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

/// Short name of `T` (no module path, no generic arguments), for use as a
/// scope label: `type_label::<Vec<u8>>() == "Vec"`.
pub fn type_label<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
