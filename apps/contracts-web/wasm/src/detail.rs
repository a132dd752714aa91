use crate::transport::FetchTransport;
use crate::{parse_config, to_json};
use dashboard_core::{ApiEndpoints, ContractApi, ContractDetailView, DetailState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Detail page for one contract plus its evidence drawer
#[wasm_bindgen]
pub struct WasmContractDetail {
    view: Rc<RefCell<ContractDetailView>>,
    api: Rc<ContractApi<FetchTransport>>,
}

#[wasm_bindgen]
impl WasmContractDetail {
    #[wasm_bindgen(constructor)]
    pub fn new(contract_id: &str, config_json: Option<String>) -> Result<WasmContractDetail, JsValue> {
        let config = parse_config(config_json)?;
        Ok(WasmContractDetail {
            view: Rc::new(RefCell::new(ContractDetailView::new(contract_id))),
            api: Rc::new(ContractApi::new(
                FetchTransport,
                ApiEndpoints::new(&config.api_base),
            )),
        })
    }

    /// Fetch `/{id}.json`; resolves to false when the record is unavailable
    #[wasm_bindgen]
    pub async fn load(&self) -> Result<bool, JsValue> {
        let id = self.view.borrow().contract_id().to_string();
        let detail = self.api.fetch_contract_detail(&id).await;
        let mut view = self.view.borrow_mut();
        view.apply(detail);
        Ok(matches!(view.state(), DetailState::Ready(_)))
    }

    #[wasm_bindgen]
    pub fn open_evidence(&self) {
        self.view.borrow_mut().open_evidence();
    }

    #[wasm_bindgen]
    pub fn close_evidence(&self) {
        self.view.borrow_mut().close_evidence();
    }

    #[wasm_bindgen(getter)]
    pub fn evidence_open(&self) -> bool {
        self.view.borrow().is_evidence_open()
    }

    #[wasm_bindgen]
    pub fn view_json(&self) -> Result<String, JsValue> {
        to_json(&self.view.borrow().view())
    }
}
