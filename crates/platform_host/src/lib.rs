//! Typed host-domain contracts shared by the manager web UI runtime and its browser adapters.
//!
//! This crate is the API-first boundary for durable UI state. It exposes the async
//! [`KeyValueStore`] strategy interface, in-process adapters used by tests and unsupported
//! targets, and snapshot helpers. Concrete browser and native-bridge backends live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;

pub use storage::kv::{KeyValueFuture, KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore};
pub use storage::snapshot::{read_snapshot_with, write_snapshot_with, STATE_SNAPSHOT_KEY};
