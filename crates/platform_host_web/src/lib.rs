//! Browser (`wasm32`) implementations of the [`platform_host`] storage contracts.
//!
//! This crate is the concrete host wiring layer for durable UI state. A page either runs
//! standalone in a browser (state goes to `localStorage`) or embedded in a native shell that
//! injects a settings bridge (state goes through the bridge). [`DualBackendStore`] hides the
//! difference behind [`platform_host::KeyValueStore`] and re-probes the page on every call.
//!
//! Page-global bindings live under `bridge/` (`bridge::interop` holds the wasm/non-wasm
//! transport glue).

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Per-call backend selection and the browser-wired store factory.
pub mod adapters;
mod bridge;
pub mod capabilities;
pub mod storage;

pub use adapters::{state_store, DualBackendStore, StoreBackend, StoreBackendKind};
pub use capabilities::{
    BrowserCapabilities, HostCapabilities, LocalStorageArea, ManualCapabilities, NativeBridge,
};
pub use storage::local_storage::{LocalStorageStore, MemoryLocalStorage};
pub use storage::native_bridge::{MemoryNativeBridge, NativeBridgeStore};
