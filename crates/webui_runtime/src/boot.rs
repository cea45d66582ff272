//! Boot sequence: hydrate the durable state, then start persisting it.

use std::rc::Rc;

use futures::task::LocalSpawn;
use platform_host::KeyValueStore;

use crate::{
    model::StateTree,
    persistence::{hydrate_state, install_persistence, HydrationOutcome, PersistenceHandle},
};

#[derive(Debug)]
/// State and persistence wiring produced by [`boot`].
pub struct BootedRuntime {
    /// Hydrated state tree shared with the UI.
    pub state: StateTree,
    /// What hydration found.
    pub hydration: HydrationOutcome,
    /// Write-back observer installed after hydration.
    pub persistence: PersistenceHandle,
}

/// Hydrates a fresh [`StateTree`] from `store` and installs persistence on it.
///
/// The observer is installed only after hydration completes, so restoring the snapshot does not
/// write it straight back.
pub async fn boot<S>(store: Rc<dyn KeyValueStore>, spawner: S) -> BootedRuntime
where
    S: LocalSpawn + 'static,
{
    let state = StateTree::default();
    let hydration = hydrate_state(store.as_ref(), &state).await;
    let persistence = install_persistence(&state, store, spawner);
    BootedRuntime {
        state,
        hydration,
        persistence,
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
/// Spawner that runs tasks on the browser's microtask queue.
pub struct BrowserSpawner;

#[cfg(target_arch = "wasm32")]
impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(
        &self,
        future: futures::task::LocalFutureObj<'static, ()>,
    ) -> Result<(), futures::task::SpawnError> {
        leptos::spawn_local(future);
        Ok(())
    }
}

/// Boots against the page's native bridge or local storage.
#[cfg(target_arch = "wasm32")]
pub async fn boot_browser() -> BootedRuntime {
    boot(Rc::new(platform_host_web::state_store()), BrowserSpawner).await
}

#[cfg(test)]
mod tests {
    use futures::executor::{block_on, LocalPool};
    use platform_host::STATE_SNAPSHOT_KEY;
    use platform_host_web::{
        DualBackendStore, LocalStorageArea, ManualCapabilities, MemoryLocalStorage,
        MemoryNativeBridge, NativeBridge,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::model::default_state;

    fn stored(raw: Option<String>) -> Value {
        serde_json::from_str(&raw.expect("snapshot written")).expect("snapshot parses")
    }

    #[test]
    fn boot_restores_from_bridge_without_writing_back() {
        let bridge = MemoryNativeBridge::default();
        block_on(bridge.set_settings_item(STATE_SNAPSHOT_KEY, r#"{"x":1}"#)).expect("seed");
        let capabilities = ManualCapabilities::default();
        capabilities.set_native_bridge(Some(Rc::new(bridge.clone()) as Rc<dyn NativeBridge>));

        let mut pool = LocalPool::new();
        let runtime = block_on(boot(
            Rc::new(DualBackendStore::new(capabilities)),
            pool.spawner(),
        ));
        pool.run_until_stalled();

        assert_eq!(runtime.hydration, HydrationOutcome::Restored);
        assert_eq!(runtime.state.snapshot(), json!({"x": 1}));
        assert_eq!(bridge.peek(STATE_SNAPSHOT_KEY).as_deref(), Some(r#"{"x":1}"#));
    }

    #[test]
    fn writes_follow_the_backend_available_at_write_time() {
        let bridge = MemoryNativeBridge::default();
        let local = MemoryLocalStorage::default();
        let capabilities = ManualCapabilities::default();
        capabilities.set_local_storage(Some(Rc::new(local.clone()) as Rc<dyn LocalStorageArea>));

        let mut pool = LocalPool::new();
        let runtime = block_on(boot(
            Rc::new(DualBackendStore::new(capabilities.clone())),
            pool.spawner(),
        ));
        assert_eq!(runtime.hydration, HydrationOutcome::Empty);
        assert_eq!(runtime.state.snapshot(), default_state());

        runtime.state.set_show_wave_bg(false);
        pool.run_until_stalled();
        assert_eq!(
            stored(local.peek(STATE_SNAPSHOT_KEY)),
            json!({"system": {"showWaveBg": false, "showMinimizedNotification": true}})
        );

        capabilities.set_native_bridge(Some(Rc::new(bridge.clone()) as Rc<dyn NativeBridge>));
        runtime.state.set_show_minimized_notification(false);
        pool.run_until_stalled();
        assert_eq!(
            stored(bridge.peek(STATE_SNAPSHOT_KEY)),
            json!({"system": {"showWaveBg": false, "showMinimizedNotification": false}})
        );
        assert_eq!(
            stored(local.peek(STATE_SNAPSHOT_KEY))["system"]["showMinimizedNotification"],
            json!(true)
        );
    }

    #[test]
    fn boot_without_any_medium_runs_on_defaults() {
        let mut pool = LocalPool::new();
        let runtime = block_on(boot(
            Rc::new(DualBackendStore::new(ManualCapabilities::default())),
            pool.spawner(),
        ));
        assert_eq!(runtime.hydration, HydrationOutcome::Empty);

        runtime.state.set_show_wave_bg(false);
        pool.run_until_stalled();
        assert!(!runtime.state.system_prefs().show_wave_bg);
    }
}
