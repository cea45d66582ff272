//! Native host bridge-backed key/value store.
//!
//! Calls are forwarded to the settings bridge the native shell injects into the page; the bridge
//! is itself asynchronous.

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use platform_host::{KeyValueFuture, KeyValueStore};

use crate::capabilities::NativeBridge;

#[derive(Clone)]
/// Key/value store backed by a [`NativeBridge`].
pub struct NativeBridgeStore {
    bridge: Rc<dyn NativeBridge>,
}

impl NativeBridgeStore {
    /// Wraps a bridge handle.
    pub fn new(bridge: Rc<dyn NativeBridge>) -> Self {
        Self { bridge }
    }
}

impl fmt::Debug for NativeBridgeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeBridgeStore")
    }
}

impl KeyValueStore for NativeBridgeStore {
    fn get_item<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Result<Option<String>, String>> {
        self.bridge.get_settings_item(key)
    }

    fn set_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>> {
        self.bridge.set_settings_item(key, value)
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory [`NativeBridge`] standing in for a host shell. Clones share the same settings map.
pub struct MemoryNativeBridge {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryNativeBridge {
    /// Returns the settings value for `key`, if any.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl NativeBridge for MemoryNativeBridge {
    fn get_settings_item<'a>(
        &'a self,
        key: &'a str,
    ) -> KeyValueFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.peek(key)) })
    }

    fn set_settings_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn native_bridge_store_forwards_to_bridge() {
        let bridge = MemoryNativeBridge::default();
        let store = NativeBridgeStore::new(Rc::new(bridge.clone()));
        let store_obj: &dyn KeyValueStore = &store;

        block_on(store_obj.set_item("piniaState", "{}")).expect("set");
        assert_eq!(bridge.peek("piniaState").as_deref(), Some("{}"));
        assert_eq!(
            block_on(store_obj.get_item("piniaState")).expect("get"),
            Some("{}".to_string())
        );
    }
}
