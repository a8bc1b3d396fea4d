//! WebAssembly module for the Coastal Hazard Reporter
//!
//! Provides the browser side of the report page:
//! - Leaflet map and DOM bindings for the report workflow ([`ReportApp`])
//! - Device geolocation and timers
//! - Small helpers the page scripts call directly

use wasm_bindgen::prelude::*;

mod app;
mod bindings;
mod device;
mod dom;
mod log;
mod map;

pub use app::{BrowserPorts, ReportApp};

use shared::models::{HazardType, Severity};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
}

/// Escape text for interpolation into HTML
#[wasm_bindgen]
pub fn escape_html(text: &str) -> String {
    shared::notify::escape_html(text)
}

/// Format an ISO-8601 timestamp in Indian Standard Time
#[wasm_bindgen]
pub fn format_report_timestamp(timestamp: &str) -> String {
    shared::format::format_timestamp_str(timestamp)
}

/// Whether a coordinate lies inside the coastal reporting area
#[wasm_bindgen]
pub fn is_near_indian_coast(lat: f64, lon: f64) -> bool {
    shared::types::is_near_indian_coast(lat, lon)
}

/// Label for a severity level, e.g. `3 - Moderate`
#[wasm_bindgen]
pub fn severity_label(level: u8) -> Option<String> {
    Severity::new(level).map(|s| s.label().to_string())
}

/// Display colour for a severity level
#[wasm_bindgen]
pub fn severity_color(level: u8) -> Option<String> {
    Severity::new(level).map(|s| s.color().to_string())
}

#[wasm_bindgen]
pub fn is_valid_phone(phone: &str) -> bool {
    shared::validation::is_valid_phone(phone)
}

/// Hazard type codes accepted by the report API, as a JSON array
#[wasm_bindgen]
pub fn hazard_type_codes() -> String {
    let codes: Vec<&str> = HazardType::ALL.iter().map(|t| t.code()).collect();
    serde_json::to_string(&codes).unwrap_or_else(|_| "[]".to_string())
}
