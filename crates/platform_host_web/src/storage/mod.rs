//! Concrete [`platform_host::KeyValueStore`] backends.

pub mod local_storage;
pub mod native_bridge;
