//! `localStorage` backing for the session token and theme

use dashboard_core::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;

/// Browser `localStorage`; every call fails with `Unavailable` when storage
/// is disabled (private mode, sandboxed iframe)
#[derive(Clone)]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"localStorage not available".into());
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("No localStorage".to_string()))
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn unavailable(err: JsValue) -> StoreError {
    StoreError::Unavailable(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(unavailable)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(unavailable)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?.remove_item(key).map_err(unavailable)
    }
}
