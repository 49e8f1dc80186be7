//! Ambient diagnostic context
//!
//! Loggers ask a `ContextProvider` for the current key/value context exactly
//! once per captured call and keep a snapshot. The default provider,
//! `ThreadContext`, reads the per-thread map managed by the [`mdc`] functions.

use std::cell::RefCell;

use crate::event::ContextMap;

/// Supplies the ambient context for the calling thread
pub trait ContextProvider: Send + Sync {
    fn context_snapshot(&self) -> ContextMap;
}

/// Context provider backed by the per-thread [`mdc`] map
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadContext;

impl ContextProvider for ThreadContext {
    fn context_snapshot(&self) -> ContextMap {
        mdc::copy_of_context_map()
    }
}

/// Provider that always reports an empty context
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl ContextProvider for NoContext {
    fn context_snapshot(&self) -> ContextMap {
        ContextMap::new()
    }
}

impl<F> ContextProvider for F
where
    F: Fn() -> ContextMap + Send + Sync,
{
    fn context_snapshot(&self) -> ContextMap {
        self()
    }
}

/// Mapped diagnostic context for the calling thread
pub mod mdc {
    use super::*;

    thread_local! {
        static CONTEXT: RefCell<ContextMap> = RefCell::new(ContextMap::new());
    }

    // Access during thread-local teardown is a no-op; reads see an empty map.

    pub fn put(key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        CONTEXT
            .try_with(|map| {
                map.borrow_mut().insert(key, value);
            })
            .ok();
    }

    pub fn get(key: &str) -> Option<String> {
        CONTEXT
            .try_with(|map| map.borrow().get(key).cloned())
            .ok()
            .flatten()
    }

    pub fn remove(key: &str) {
        CONTEXT
            .try_with(|map| {
                map.borrow_mut().remove(key);
            })
            .ok();
    }

    pub fn clear() {
        CONTEXT.try_with(|map| map.borrow_mut().clear()).ok();
    }

    pub fn copy_of_context_map() -> ContextMap {
        CONTEXT
            .try_with(|map| map.borrow().clone())
            .unwrap_or_default()
    }

    /// Replace the whole map with a copy of `context`
    pub fn set_context_map<K, V>(context: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let copy: ContextMap = context
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        CONTEXT.try_with(|map| *map.borrow_mut() = copy).ok();
    }
}
