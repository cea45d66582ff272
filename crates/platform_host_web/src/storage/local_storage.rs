//! `localStorage`-backed key/value store implementation.
//!
//! The browser API is synchronous; this adapter wraps it in the async
//! [`platform_host::KeyValueStore`] contract so callers cannot tell it apart from the native
//! bridge backend.

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use platform_host::{KeyValueFuture, KeyValueStore};

use crate::capabilities::LocalStorageArea;

#[derive(Clone)]
/// Key/value store backed by a [`LocalStorageArea`].
pub struct LocalStorageStore {
    area: Rc<dyn LocalStorageArea>,
}

impl LocalStorageStore {
    /// Wraps a storage area.
    pub fn new(area: Rc<dyn LocalStorageArea>) -> Self {
        Self { area }
    }
}

impl fmt::Debug for LocalStorageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LocalStorageStore")
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_item<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { self.area.get_item(key) })
    }

    fn set_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>> {
        Box::pin(async move { self.area.set_item(key, value) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory [`LocalStorageArea`] for non-browser hosts and tests. Clones share the same map.
pub struct MemoryLocalStorage {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryLocalStorage {
    /// Returns the value for `key`, if any.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl LocalStorageArea for MemoryLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.peek(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
