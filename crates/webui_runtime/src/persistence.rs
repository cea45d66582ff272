//! Boot hydration and write-back of the durable state snapshot.

use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};
use leptos::logging;
use platform_host::{read_snapshot_with, write_snapshot_with, KeyValueStore, STATE_SNAPSHOT_KEY};
use serde_json::Value;

use crate::model::{ObserverId, StateTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What boot hydration found under the snapshot key.
pub enum HydrationOutcome {
    /// A snapshot was found and replaced the in-memory state.
    Restored,
    /// Nothing was stored; defaults stay in place.
    Empty,
    /// The stored snapshot was not valid JSON; defaults stay in place.
    Corrupt,
    /// The store failed to read; defaults stay in place.
    Unavailable,
}

/// Loads the persisted snapshot into `tree`, replacing its state wholesale.
///
/// Failures are logged and leave the default state in place; hydration never fails boot.
pub async fn hydrate_state<S: KeyValueStore + ?Sized>(
    store: &S,
    tree: &StateTree,
) -> HydrationOutcome {
    let raw = match read_snapshot_with(store, STATE_SNAPSHOT_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return HydrationOutcome::Empty,
        Err(err) => {
            logging::warn!("state snapshot load failed: {err}");
            return HydrationOutcome::Unavailable;
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(state) => {
            tree.replace(state);
            HydrationOutcome::Restored
        }
        Err(err) => {
            logging::warn!("state snapshot is corrupt, keeping defaults: {err}");
            HydrationOutcome::Corrupt
        }
    }
}

#[derive(Debug)]
/// Installed write-back observer.
pub struct PersistenceHandle {
    tree: StateTree,
    observer: ObserverId,
}

impl PersistenceHandle {
    /// Stops persisting further changes. Writes already scheduled still run.
    pub fn detach(self) -> bool {
        self.tree.unsubscribe(self.observer)
    }
}

/// Writes the full state to `store` after every change of `tree`.
///
/// Each change schedules one write on `spawner`; writes are not awaited, so the last one to
/// complete wins. A write serializes the tree as it is when the write runs, so changes made by
/// other observers after this one was notified are never lost. Failures are logged.
pub fn install_persistence<S>(
    tree: &StateTree,
    store: Rc<dyn KeyValueStore>,
    spawner: S,
) -> PersistenceHandle
where
    S: LocalSpawn + 'static,
{
    let source = tree.downgrade();
    let observer = tree.subscribe(move |notified| {
        let store = store.clone();
        let source = source.clone();
        let notified = notified.clone();
        let write = async move {
            let state = source
                .upgrade()
                .map(|tree| tree.snapshot())
                .unwrap_or(notified);
            if let Err(err) = write_snapshot_with(store.as_ref(), STATE_SNAPSHOT_KEY, &state).await
            {
                logging::warn!("persist state snapshot failed: {err}");
            }
        };
        if let Err(err) = spawner.spawn_local(write) {
            logging::warn!("persist state snapshot not scheduled: {err}");
        }
    });

    PersistenceHandle {
        tree: tree.clone(),
        observer,
    }
}
