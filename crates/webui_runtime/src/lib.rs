//! Runtime wiring for the node manager web UI.
//!
//! The UI keeps its durable preferences in one observable JSON [`StateTree`]. At boot the tree is
//! hydrated from the persisted snapshot, then every mutation is written back as a full snapshot
//! through the selected [`platform_host::KeyValueStore`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod boot;
pub mod hooks;
pub mod model;
pub mod persistence;

#[cfg(target_arch = "wasm32")]
pub use boot::{boot_browser, BrowserSpawner};
pub use boot::{boot, BootedRuntime};
pub use hooks::{logging_error_hooks, manager_client};
pub use model::{
    default_state, ObserverId, StateObserver, StateTree, SystemPrefs, WeakStateTree, SYSTEM_SLICE,
};
pub use persistence::{hydrate_state, install_persistence, HydrationOutcome, PersistenceHandle};
