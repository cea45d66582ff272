//! Whole-state snapshot contract: one opaque serialized blob under one fixed key.

use serde_json::Value;

use super::kv::KeyValueStore;

/// Key under which the durable UI state snapshot is stored.
///
/// The native shell already holds snapshots under this name, so it must not change.
pub const STATE_SNAPSHOT_KEY: &str = "piniaState";

/// Reads the raw snapshot stored under `key`.
///
/// An absent value and an empty string both mean "no prior state" and yield `Ok(None)`.
///
/// # Errors
///
/// Returns an error when the backing store fails.
pub async fn read_snapshot_with<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Option<String>, String> {
    let raw = store.get_item(key).await?;
    Ok(raw.filter(|raw| !raw.trim().is_empty()))
}

/// Serializes `state` and replaces the snapshot stored under `key`.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn write_snapshot_with<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    state: &Value,
) -> Result<(), String> {
    let raw = serde_json::to_string(state).map_err(|e| e.to_string())?;
    store.set_item(key, &raw).await
}
