//! Browser console logging

use wasm_bindgen::JsValue;

pub fn info(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

pub fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Log a failed DOM or JS call with what was being done
pub fn error(context: &str, err: &JsValue) {
    web_sys::console::error_2(&JsValue::from_str(&format!("Error {}:", context)), err);
}
