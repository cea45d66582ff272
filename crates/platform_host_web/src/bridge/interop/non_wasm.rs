use super::*;

pub fn native_bridge() -> Option<Rc<dyn NativeBridge>> {
    None
}

pub fn local_storage() -> Option<Rc<dyn LocalStorageArea>> {
    None
}
