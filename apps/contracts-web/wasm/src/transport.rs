//! `window.fetch` transport for the static contract endpoints

use async_trait::async_trait;
use dashboard_core::{FetchError, Transport, TransportResponse};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn transport_error(err: JsValue) -> FetchError {
    FetchError::Transport(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn get(&self, path: &str) -> Result<TransportResponse, FetchError> {
        let window =
            web_sys::window().ok_or_else(|| FetchError::Transport("No window".to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(path, &opts).map_err(transport_error)?;
        request
            .headers()
            .set("Accept", "application/json")
            .map_err(transport_error)?;

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport_error)?;
        let response: Response = response.dyn_into().map_err(transport_error)?;

        let text = JsFuture::from(response.text().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;

        Ok(TransportResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}
