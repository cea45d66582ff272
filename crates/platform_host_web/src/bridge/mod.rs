//! Page-global bindings for the persistence media probed by [`crate::BrowserCapabilities`].
//!
//! Transport glue lives in `interop`, which routes to the `wasm32` bindings or to a non-wasm shim
//! that reports every medium as absent.

mod interop;

use std::rc::Rc;

use crate::capabilities::{LocalStorageArea, NativeBridge};

pub(crate) fn native_bridge() -> Option<Rc<dyn NativeBridge>> {
    interop::native_bridge()
}

pub(crate) fn local_storage() -> Option<Rc<dyn LocalStorageArea>> {
    interop::local_storage()
}
