//! Persistence contracts for durable UI state.

pub mod kv;
pub mod snapshot;
