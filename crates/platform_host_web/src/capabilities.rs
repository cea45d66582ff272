//! Runtime capability probe for the persistence media a page may have access to.
//!
//! The same UI bundle runs standalone in a browser and embedded in a native shell that injects a
//! settings bridge object. Nothing here caches what it finds: every probe looks again, so a bridge
//! that appears or disappears mid-session is picked up by the next storage call.

use std::{cell::RefCell, fmt, rc::Rc};

use platform_host::KeyValueFuture;

/// Settings bridge exposed by a native host shell.
pub trait NativeBridge {
    /// Reads a settings value through the host.
    fn get_settings_item<'a>(
        &'a self,
        key: &'a str,
    ) -> KeyValueFuture<'a, Result<Option<String>, String>>;

    /// Writes a settings value through the host.
    fn set_settings_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>>;
}

/// Synchronous string storage area with `localStorage` semantics.
pub trait LocalStorageArea {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage area rejects the read.
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage area rejects the write (quota, privacy mode).
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
}

/// Probe answering which persistence media are reachable right now.
pub trait HostCapabilities {
    /// Returns the native host bridge when one is injected into the page.
    fn native_bridge(&self) -> Option<Rc<dyn NativeBridge>>;

    /// Returns the browser local storage area when the page may use it.
    fn local_storage(&self) -> Option<Rc<dyn LocalStorageArea>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Probe backed by the real page globals (`window.qtBackend`, `window.localStorage`).
///
/// Off `wasm32` neither medium exists.
pub struct BrowserCapabilities;

impl HostCapabilities for BrowserCapabilities {
    fn native_bridge(&self) -> Option<Rc<dyn NativeBridge>> {
        crate::bridge::native_bridge()
    }

    fn local_storage(&self) -> Option<Rc<dyn LocalStorageArea>> {
        crate::bridge::local_storage()
    }
}

#[derive(Clone, Default)]
/// Probe whose answers are installed by the embedder.
///
/// Clones share the same slots, so a test or host can install or remove a medium after the store
/// that uses the probe was built.
pub struct ManualCapabilities {
    native_bridge: Rc<RefCell<Option<Rc<dyn NativeBridge>>>>,
    local_storage: Rc<RefCell<Option<Rc<dyn LocalStorageArea>>>>,
}

impl ManualCapabilities {
    /// Installs or removes the native bridge.
    pub fn set_native_bridge(&self, bridge: Option<Rc<dyn NativeBridge>>) {
        *self.native_bridge.borrow_mut() = bridge;
    }

    /// Installs or removes the local storage area.
    pub fn set_local_storage(&self, area: Option<Rc<dyn LocalStorageArea>>) {
        *self.local_storage.borrow_mut() = area;
    }
}

impl fmt::Debug for ManualCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualCapabilities")
            .field("native_bridge", &self.native_bridge.borrow().is_some())
            .field("local_storage", &self.local_storage.borrow().is_some())
            .finish()
    }
}

impl HostCapabilities for ManualCapabilities {
    fn native_bridge(&self) -> Option<Rc<dyn NativeBridge>> {
        self.native_bridge.borrow().clone()
    }

    fn local_storage(&self) -> Option<Rc<dyn LocalStorageArea>> {
        self.local_storage.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryLocalStorage, MemoryNativeBridge};

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn browser_probe_finds_nothing_off_wasm() {
        let probe = BrowserCapabilities;
        assert!(probe.native_bridge().is_none());
        assert!(probe.local_storage().is_none());
    }

    #[test]
    fn manual_probe_reflects_installs_through_clones() {
        let probe = ManualCapabilities::default();
        let view = probe.clone();
        assert!(view.native_bridge().is_none());

        probe.set_native_bridge(Some(Rc::new(MemoryNativeBridge::default())));
        probe.set_local_storage(Some(Rc::new(MemoryLocalStorage::default())));
        assert!(view.native_bridge().is_some());
        assert!(view.local_storage().is_some());
        assert_eq!(
            format!("{view:?}"),
            "ManualCapabilities { native_bridge: true, local_storage: true }"
        );

        probe.set_native_bridge(None);
        assert!(view.native_bridge().is_none());
    }
}
