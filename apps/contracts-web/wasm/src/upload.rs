//! Upload overlay bindings

use crate::timers::TimeoutScheduler;
use crate::{parse_config, to_json};
use dashboard_core::{RandomOutcomes, UploadPanel};
use js_sys::Function;
use rand::rngs::StdRng;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::FileList;

#[wasm_bindgen]
pub struct WasmUploadPanel {
    panel: UploadPanel<TimeoutScheduler, RandomOutcomes<StdRng>>,
}

#[wasm_bindgen]
impl WasmUploadPanel {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmUploadPanel, JsValue> {
        let config = parse_config(config_json)?;
        Ok(WasmUploadPanel {
            panel: UploadPanel::new(
                TimeoutScheduler,
                RandomOutcomes::from_entropy(&config.upload),
            ),
        })
    }

    /// Register the re-render hook fired whenever a file finishes
    ///
    /// Applies to files dropped after this call.
    #[wasm_bindgen]
    pub fn set_on_change(&mut self, callback: Option<Function>) {
        let listener = callback.map(|f| {
            Rc::new(move || {
                if let Err(e) = f.call0(&JsValue::NULL) {
                    web_sys::console::error_2(&"Upload change callback failed".into(), &e);
                }
            }) as Rc<dyn Fn()>
        });
        self.panel.set_on_change(listener);
    }

    #[wasm_bindgen(getter)]
    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    #[wasm_bindgen]
    pub fn open(&mut self) {
        self.panel.open();
    }

    /// Hide the overlay and forget the batch
    #[wasm_bindgen]
    pub fn close(&mut self) {
        self.panel.close();
    }

    /// Handle a drop event's `dataTransfer.files`; returns how many were queued
    #[wasm_bindgen]
    pub fn submit_files(&mut self, files: &FileList) -> u32 {
        let names: Vec<String> = (0..files.length())
            .filter_map(|i| files.get(i))
            .map(|file| file.name())
            .collect();
        self.panel.submit_batch(names).len() as u32
    }

    /// Queue plain file names (an array of strings)
    #[wasm_bindgen]
    pub fn submit_names(&mut self, names: JsValue) -> Result<u32, JsValue> {
        let names: Vec<String> = serde_wasm_bindgen::from_value(names)?;
        Ok(self.panel.submit_batch(names).len() as u32)
    }

    /// `[{"id":0,"name":"lease.pdf","status":"uploading"}, ...]`
    #[wasm_bindgen]
    pub fn files_json(&self) -> Result<String, JsValue> {
        to_json(&self.panel.files())
    }

    #[wasm_bindgen]
    pub fn counts_json(&self) -> Result<String, JsValue> {
        to_json(&self.panel.counts())
    }

    #[wasm_bindgen(getter)]
    pub fn settled(&self) -> bool {
        self.panel.is_settled()
    }
}
