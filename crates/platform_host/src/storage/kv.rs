//! String key/value storage contracts and in-process adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`KeyValueStore`] async methods.
pub type KeyValueFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for durable string values addressed by a single string key.
///
/// Both operations are asynchronous even when the backing medium is synchronous, so callers never
/// need to know which backend serviced a call.
pub trait KeyValueStore {
    /// Reads the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` for keys that were never written.
    fn get_item<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw value stored under `key`.
    fn set_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Result<Option<String>, String>> {
        (**self).get_item(key)
    }

    fn set_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>> {
        (**self).set_item(key, value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Store used when no persistence medium is available: reads are empty and writes are dropped.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn get_item<'a>(&'a self, _key: &'a str) -> KeyValueFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn set_item<'a>(
        &'a self,
        _key: &'a str,
        _value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory key/value store. Clones share the same map.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemoryKeyValueStore {
    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::default();
        store.inner.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        store
    }

    /// Returns the current value for `key` without going through the async contract.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Returns every `(key, value)` pair written through [`KeyValueStore::set_item`], oldest
    /// first.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.peek(key)) })
    }

    fn set_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            self.writes
                .borrow_mut()
                .push((key.to_string(), value.to_string()));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_store_round_trip_and_overwrite() {
        let store = MemoryKeyValueStore::default();
        let store_obj: &dyn KeyValueStore = &store;

        block_on(store_obj.set_item("state", "{\"k\":1}")).expect("set");
        block_on(store_obj.set_item("state", "{\"k\":2}")).expect("overwrite");
        assert_eq!(
            block_on(store_obj.get_item("state")).expect("get"),
            Some("{\"k\":2}".to_string())
        );
        assert_eq!(store.writes().len(), 2);
    }

    #[test]
    fn memory_store_unset_key_is_empty() {
        let store = MemoryKeyValueStore::with_entries([("present", "1")]);
        assert_eq!(block_on(store.get_item("absent")).expect("get"), None);
        assert_eq!(store.peek("present").as_deref(), Some("1"));
        assert!(store.writes().is_empty());
    }

    #[test]
    fn clones_share_the_same_map() {
        let store = MemoryKeyValueStore::default();
        let shared = Rc::new(store.clone());
        block_on(shared.set_item("k", "v")).expect("set through rc");
        assert_eq!(store.peek("k").as_deref(), Some("v"));
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopKeyValueStore;
        let store_obj: &dyn KeyValueStore = &store;
        assert_eq!(block_on(store_obj.get_item("k")).expect("get"), None);
        block_on(store_obj.set_item("k", "{}")).expect("set");
        assert_eq!(block_on(store_obj.get_item("k")).expect("get"), None);
    }
}
