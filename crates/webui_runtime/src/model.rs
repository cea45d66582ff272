//! Observable durable UI state.
//!
//! The whole durable state is one JSON tree so it can be snapshotted and restored without knowing
//! which slices exist. Typed views such as [`SystemPrefs`] read and write their own slice.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Top-level key of the system preferences slice.
pub const SYSTEM_SLICE: &str = "system";

/// Callback notified with the full state after every change.
pub type StateObserver = Rc<dyn Fn(&Value)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Registration handle returned by [`StateTree::subscribe`].
pub struct ObserverId(u64);

/// State every session starts from before hydration.
pub fn default_state() -> Value {
    let mut root = Map::new();
    root.insert(SYSTEM_SLICE.to_string(), SystemPrefs::default().to_value());
    Value::Object(root)
}

/// Shared, observable JSON state tree. Clones share the same tree.
#[derive(Clone)]
pub struct StateTree {
    inner: Rc<TreeInner>,
}

/// Non-owning handle to a [`StateTree`], for observers that must not keep it alive.
#[derive(Clone)]
pub struct WeakStateTree {
    inner: Weak<TreeInner>,
}

impl WeakStateTree {
    /// Returns the tree if it is still alive.
    pub fn upgrade(&self) -> Option<StateTree> {
        self.inner.upgrade().map(|inner| StateTree { inner })
    }
}

impl fmt::Debug for WeakStateTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakStateTree")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

struct TreeInner {
    state: RefCell<Value>,
    observers: RefCell<Vec<(ObserverId, StateObserver)>>,
    next_observer: Cell<u64>,
}

impl Default for StateTree {
    fn default() -> Self {
        Self::new(default_state())
    }
}

impl fmt::Debug for StateTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTree")
            .field("state", &*self.inner.state.borrow())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

impl StateTree {
    /// Creates a tree holding `initial`.
    pub fn new(initial: Value) -> Self {
        Self {
            inner: Rc::new(TreeInner {
                state: RefCell::new(initial),
                observers: RefCell::new(Vec::new()),
                next_observer: Cell::new(0),
            }),
        }
    }

    /// Non-owning handle to this tree.
    pub fn downgrade(&self) -> WeakStateTree {
        WeakStateTree {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> Value {
        self.inner.state.borrow().clone()
    }

    /// Reads the current state without copying it.
    pub fn with_state<R>(&self, read: impl FnOnce(&Value) -> R) -> R {
        read(&*self.inner.state.borrow())
    }

    /// Mutates the state in place and notifies observers if anything changed.
    ///
    /// Returns whether the state changed. Observers run after the mutation borrow is released, so
    /// they may read or update the tree themselves. Each observer is handed the state as it is when
    /// that observer runs, including changes made by observers before it.
    pub fn update(&self, mutate: impl FnOnce(&mut Value)) -> bool {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let before = state.clone();
            mutate(&mut *state);
            *state != before
        };
        if changed {
            self.notify();
        }
        changed
    }

    /// Replaces the whole state.
    pub fn replace(&self, next: Value) -> bool {
        self.update(move |state| *state = next)
    }

    /// Registers `observer` for every subsequent change.
    pub fn subscribe(&self, observer: impl Fn(&Value) + 'static) -> ObserverId {
        let id = ObserverId(self.inner.next_observer.get());
        self.inner.next_observer.set(id.0 + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Rc::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.inner.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(registered, _)| *registered != id);
        observers.len() != before
    }

    /// Typed view of the system preferences slice, with defaults for anything missing.
    pub fn system_prefs(&self) -> SystemPrefs {
        self.with_state(|state| {
            state
                .get(SYSTEM_SLICE)
                .and_then(|slice| SystemPrefs::deserialize(slice).ok())
                .unwrap_or_default()
        })
    }

    /// Shows or hides the animated wave background.
    pub fn set_show_wave_bg(&self, show: bool) -> bool {
        self.set_system_field("showWaveBg", show)
    }

    /// Enables or disables the notification shown when the window is minimized.
    pub fn set_show_minimized_notification(&self, show: bool) -> bool {
        self.set_system_field("showMinimizedNotification", show)
    }

    fn set_system_field(&self, field: &str, value: bool) -> bool {
        self.update(|state| {
            if !state.is_object() {
                *state = Value::Object(Map::new());
            }
            let Some(root) = state.as_object_mut() else {
                return;
            };
            let slice = root
                .entry(SYSTEM_SLICE)
                .or_insert_with(|| Value::Object(Map::new()));
            if !slice.is_object() {
                *slice = Value::Object(Map::new());
            }
            if let Some(slice) = slice.as_object_mut() {
                slice.insert(field.to_string(), Value::Bool(value));
            }
        })
    }

    fn notify(&self) {
        let observers: Vec<StateObserver> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            let state = self.snapshot();
            observer(&state);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Shell-level display preferences.
pub struct SystemPrefs {
    /// Animated wave background on the dashboard.
    pub show_wave_bg: bool,
    /// Notify the user when the window is minimized to the tray.
    pub show_minimized_notification: bool,
}

impl SystemPrefs {
    /// JSON form stored in the state tree.
    pub fn to_value(self) -> Value {
        json!({
            "showWaveBg": self.show_wave_bg,
            "showMinimizedNotification": self.show_minimized_notification,
        })
    }
}

impl Default for SystemPrefs {
    fn default() -> Self {
        Self {
            show_wave_bg: true,
            show_minimized_notification: true,
        }
    }
}
