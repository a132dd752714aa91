use crate::transport::FetchTransport;
use crate::{parse_config, to_json};
use dashboard_core::filter::{risk_options, status_options};
use dashboard_core::{
    ApiEndpoints, ContractApi, ContractsDashboard, LoadState, RiskFilter, StatusFilter,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Contracts table: search, filters, pagination
#[wasm_bindgen]
pub struct WasmDashboard {
    dashboard: Rc<RefCell<ContractsDashboard>>,
    api: Rc<ContractApi<FetchTransport>>,
}

#[wasm_bindgen]
impl WasmDashboard {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmDashboard, JsValue> {
        let config = parse_config(config_json)?;
        Ok(WasmDashboard {
            dashboard: Rc::new(RefCell::new(ContractsDashboard::new(config.page_size))),
            api: Rc::new(ContractApi::new(
                FetchTransport,
                ApiEndpoints::new(&config.api_base),
            )),
        })
    }

    /// Fetch `/contracts.json`; resolves to the load state name
    #[wasm_bindgen]
    pub async fn load(&self) -> Result<String, JsValue> {
        self.dashboard.borrow_mut().begin_loading();
        let result = self.api.fetch_contract_list().await;
        let mut dashboard = self.dashboard.borrow_mut();
        dashboard.apply_fetch_result(result);
        let state = match dashboard.load_state() {
            LoadState::Loading => "loading",
            LoadState::Ready => "ready",
            LoadState::Empty => "empty",
            LoadState::Failed(reason) => {
                web_sys::console::error_1(&format!("Failed to load contracts: {}", reason).into());
                "failed"
            }
        };
        Ok(state.to_string())
    }

    #[wasm_bindgen]
    pub fn set_query(&self, query: &str) {
        self.dashboard.borrow_mut().set_query(query);
    }

    /// `"All"` or a status label such as `"Renewal Due"`
    #[wasm_bindgen]
    pub fn set_status_filter(&self, value: &str) -> Result<(), JsValue> {
        let status = value
            .parse::<StatusFilter>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.dashboard.borrow_mut().set_status_filter(status);
        Ok(())
    }

    /// `"All"`, `"Low"`, `"Medium"` or `"High"`
    #[wasm_bindgen]
    pub fn set_risk_filter(&self, value: &str) -> Result<(), JsValue> {
        let risk = value
            .parse::<RiskFilter>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.dashboard.borrow_mut().set_risk_filter(risk);
        Ok(())
    }

    /// Returns false (and stays put) for pages outside the valid range
    #[wasm_bindgen]
    pub fn go_to_page(&self, page: u32) -> bool {
        self.dashboard.borrow_mut().go_to_page(page as usize)
    }

    #[wasm_bindgen]
    pub fn next_page(&self) -> bool {
        self.dashboard.borrow_mut().next_page()
    }

    #[wasm_bindgen]
    pub fn previous_page(&self) -> bool {
        self.dashboard.borrow_mut().previous_page()
    }

    #[wasm_bindgen(getter)]
    pub fn current_page(&self) -> u32 {
        self.dashboard.borrow().current_page() as u32
    }

    /// Rows, pagination footer and notices for the current state
    #[wasm_bindgen]
    pub fn view_json(&self) -> Result<String, JsValue> {
        to_json(&self.dashboard.borrow().view())
    }

    #[wasm_bindgen]
    pub fn status_options(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&status_options()).map_err(JsValue::from)
    }

    #[wasm_bindgen]
    pub fn risk_options(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&risk_options()).map_err(JsValue::from)
    }
}
