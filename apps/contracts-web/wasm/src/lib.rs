//! ContractX - Contract Dashboard
//!
//! Browser bindings for the dashboard engines. The page script owns the DOM;
//! everything stateful (session, table, detail page, upload panel) lives here.

use dashboard_core::DashboardConfig;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod dashboard;
pub mod detail;
pub mod storage;
pub mod timers;
pub mod transport;
pub mod upload;

pub use app::WasmApp;
pub use dashboard::WasmDashboard;
pub use detail::WasmContractDetail;
pub use storage::LocalStorage;
pub use timers::{sleep, TimeoutScheduler};
pub use transport::FetchTransport;
pub use upload::WasmUploadPanel;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"ContractX WASM initialized".into());
}

/// Parse the optional JSON config handed over by the page script
pub(crate) fn parse_config(config_json: Option<String>) -> Result<DashboardConfig, JsValue> {
    match config_json {
        Some(json) if !json.trim().is_empty() => {
            DashboardConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))
        }
        _ => Ok(DashboardConfig::default()),
    }
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `true` when the OS asks for a dark colour scheme
#[wasm_bindgen]
pub fn prefers_dark_scheme() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}
