//! Lookup of `window.qtBackend` and `window.localStorage`.
//!
//! On wasm the lookups go through the browser bindings. Native builds have no page, so the shim
//! reports both media as absent and the store falls back to the no-op backend.

use std::rc::Rc;

use crate::capabilities::{LocalStorageArea, NativeBridge};

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub fn native_bridge() -> Option<Rc<dyn NativeBridge>> {
    imp::native_bridge()
}

pub fn local_storage() -> Option<Rc<dyn LocalStorageArea>> {
    imp::local_storage()
}
