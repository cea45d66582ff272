use super::*;
use js_sys::{Array, Function, Promise, Reflect};
use platform_host::KeyValueFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Page global injected by the native shell.
const NATIVE_BRIDGE_GLOBAL: &str = "qtBackend";
const GET_SETTINGS_ITEM: &str = "get_settings_item";
const SET_SETTINGS_ITEM: &str = "set_settings_item";

pub fn native_bridge() -> Option<Rc<dyn NativeBridge>> {
    let window = web_sys::window()?;
    let bridge = Reflect::get(&window, &JsValue::from_str(NATIVE_BRIDGE_GLOBAL)).ok()?;
    if bridge.is_undefined() || bridge.is_null() {
        return None;
    }
    Some(Rc::new(JsNativeBridge { bridge }))
}

pub fn local_storage() -> Option<Rc<dyn LocalStorageArea>> {
    let storage = web_sys::window()?.local_storage().ok().flatten()?;
    Some(Rc::new(WebLocalStorage { storage }))
}

struct JsNativeBridge {
    bridge: JsValue,
}

impl JsNativeBridge {
    async fn call(&self, method: &str, args: &Array) -> Result<JsValue, String> {
        let function = Reflect::get(&self.bridge, &JsValue::from_str(method))
            .map_err(js_error_to_string)?
            .dyn_into::<Function>()
            .map_err(|_| format!("native bridge method `{method}` is not callable"))?;
        let result = function
            .apply(&self.bridge, args)
            .map_err(js_error_to_string)?;
        // Bridge methods may answer with a plain value or a promise.
        JsFuture::from(Promise::resolve(&result))
            .await
            .map_err(js_error_to_string)
    }
}

impl NativeBridge for JsNativeBridge {
    fn get_settings_item<'a>(
        &'a self,
        key: &'a str,
    ) -> KeyValueFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move {
            let value = self
                .call(GET_SETTINGS_ITEM, &Array::of1(&JsValue::from_str(key)))
                .await?;
            Ok(value.as_string())
        })
    }

    fn set_settings_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.call(
                SET_SETTINGS_ITEM,
                &Array::of2(&JsValue::from_str(key), &JsValue::from_str(value)),
            )
            .await
            .map(|_| ())
        })
    }
}

struct WebLocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorageArea for WebLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        self.storage
            .get_item(key)
            .map_err(|e| format!("localStorage get_item failed: {}", js_error_to_string(e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.storage
            .set_item(key, value)
            .map_err(|e| format!("localStorage set_item failed: {}", js_error_to_string(e)))
    }
}

fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}
