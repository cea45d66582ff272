use std::{cell::Cell, rc::Rc};

use leptos::logging;
use platform_host::{KeyValueFuture, KeyValueStore, NoopKeyValueStore};

use crate::{
    capabilities::{BrowserCapabilities, HostCapabilities},
    LocalStorageStore, NativeBridgeStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Persistence medium chosen for a single storage call.
pub enum StoreBackendKind {
    /// Settings bridge injected by a native host shell.
    NativeBridge,
    /// Browser `localStorage`.
    LocalStorage,
    /// No medium reachable; reads are empty and writes are dropped.
    Unavailable,
}

impl StoreBackendKind {
    /// Returns the backend kind as a stable string token.
    pub fn name(self) -> &'static str {
        match self {
            Self::NativeBridge => "native-bridge",
            Self::LocalStorage => "local-storage",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Adapter enum that erases the concrete backend behind [`KeyValueStore`].
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// Native host bridge persistence.
    NativeBridge(NativeBridgeStore),
    /// Browser `localStorage` persistence.
    LocalStorage(LocalStorageStore),
    /// No-op fallback used when neither medium is present.
    Unavailable(NoopKeyValueStore),
}

impl StoreBackend {
    /// Returns which medium this backend writes to.
    pub fn kind(&self) -> StoreBackendKind {
        match self {
            Self::NativeBridge(_) => StoreBackendKind::NativeBridge,
            Self::LocalStorage(_) => StoreBackendKind::LocalStorage,
            Self::Unavailable(_) => StoreBackendKind::Unavailable,
        }
    }
}

impl KeyValueStore for StoreBackend {
    fn get_item<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::NativeBridge(store) => store.get_item(key),
            Self::LocalStorage(store) => store.get_item(key),
            Self::Unavailable(store) => store.get_item(key),
        }
    }

    fn set_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>> {
        match self {
            Self::NativeBridge(store) => store.set_item(key, value),
            Self::LocalStorage(store) => store.set_item(key, value),
            Self::Unavailable(store) => store.set_item(key, value),
        }
    }
}

/// Key/value store that prefers the native host bridge and falls back to `localStorage`.
///
/// The backend is chosen by probing `C` on every call, never cached. Switches between backends
/// are logged. Clones share the record of the last backend used.
#[derive(Debug, Clone, Default)]
pub struct DualBackendStore<C = BrowserCapabilities> {
    capabilities: C,
    last_used: Rc<Cell<Option<StoreBackendKind>>>,
}

impl<C: HostCapabilities> DualBackendStore<C> {
    /// Creates a store that probes `capabilities` on each call.
    pub fn new(capabilities: C) -> Self {
        Self {
            capabilities,
            last_used: Rc::default(),
        }
    }

    /// Backend that serviced the most recent call, if any call was made.
    pub fn last_backend(&self) -> Option<StoreBackendKind> {
        self.last_used.get()
    }

    /// Probes the host and returns the backend that would service a call made now.
    pub fn select_backend(&self) -> StoreBackend {
        if let Some(bridge) = self.capabilities.native_bridge() {
            return StoreBackend::NativeBridge(NativeBridgeStore::new(bridge));
        }
        if let Some(area) = self.capabilities.local_storage() {
            return StoreBackend::LocalStorage(LocalStorageStore::new(area));
        }
        StoreBackend::Unavailable(NoopKeyValueStore)
    }

    fn backend_for_call(&self) -> StoreBackend {
        let backend = self.select_backend();
        let kind = backend.kind();
        if self.last_used.replace(Some(kind)) != Some(kind) {
            logging::log!("state store backend: {}", kind.name());
        }
        backend
    }
}

impl<C: HostCapabilities> KeyValueStore for DualBackendStore<C> {
    fn get_item<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Result<Option<String>, String>> {
        let backend = self.backend_for_call();
        Box::pin(async move { backend.get_item(key).await })
    }

    fn set_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>> {
        let backend = self.backend_for_call();
        Box::pin(async move { backend.set_item(key, value).await })
    }
}

/// Builds the state store wired to the real page globals.
pub fn state_store() -> DualBackendStore<BrowserCapabilities> {
    DualBackendStore::new(BrowserCapabilities)
}
