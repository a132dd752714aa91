//! Data access for the static contract endpoints
//!
//! Two read endpoints exist: the collection (`/contracts.json`) and one file per
//! contract (`/{id}.json`). Every call is one-shot: no retries, no caching.
//! Requests go through the [`Transport`] trait so the same client runs against
//! `window.fetch` in the browser, a directory of JSON files natively, or an
//! in-memory table in tests.

use crate::error::FetchError;
use async_trait::async_trait;
use contract_types::{ContractDetail, ContractSummary};
use serde::de::DeserializeOwned;
use std::cell::Cell;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Raw response from a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A GET-only transport
///
/// Futures are not `Send`: the browser implementation holds JS values.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, path: &str) -> Result<TransportResponse, FetchError>;
}

/// Endpoint layout of the static site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base: String,
}

impl ApiEndpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn contracts(&self) -> String {
        format!("{}/contracts.json", self.base)
    }

    pub fn contract(&self, id: &str) -> String {
        format!("{}/{}.json", self.base, id)
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self::new("")
    }
}

/// Client for the contract endpoints
pub struct ContractApi<T> {
    transport: T,
    endpoints: ApiEndpoints,
}

impl<T: Transport> ContractApi<T> {
    pub fn new(transport: T, endpoints: ApiEndpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the full contract list in server order
    ///
    /// # Errors
    /// Non-2xx status, transport failure, or a body that is not an array of
    /// contract summaries.
    pub async fn fetch_contract_list(&self) -> Result<Vec<ContractSummary>, FetchError> {
        let path = self.endpoints.contracts();
        let contracts: Vec<ContractSummary> = self.get_json(&path).await?;
        info!("Fetched {} contracts from {}", contracts.len(), path);
        Ok(contracts)
    }

    /// Fetch one contract record
    ///
    /// Any failure (missing record, bad status, malformed body) yields `None`;
    /// the cause is only logged.
    pub async fn fetch_contract_detail(&self, id: &str) -> Option<ContractDetail> {
        let path = self.endpoints.contract(id);
        match self.get_json::<ContractDetail>(&path).await {
            Ok(detail) => {
                debug!("Fetched contract {}", detail.id());
                Some(detail)
            }
            Err(e) => {
                warn!("Contract {} unavailable: {}", id, e);
                None
            }
        }
    }

    async fn get_json<D: DeserializeOwned>(&self, path: &str) -> Result<D, FetchError> {
        let response = self.transport.get(path).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: response.status,
            });
        }
        serde_json::from_str(&response.body).map_err(|source| FetchError::Parse {
            path: path.to_string(),
            source,
        })
    }
}

/// Transport backed by a fixed path table
///
/// Unknown paths answer 404. Counts requests so callers can check that
/// nothing is cached.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    routes: HashMap<String, Result<TransportResponse, String>>,
    requests: Cell<usize>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, path: &str, body: impl Into<String>) -> Self {
        self.routes
            .insert(path.to_string(), Ok(TransportResponse::ok(body)));
        self
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.routes
            .insert(path.to_string(), Ok(TransportResponse::with_status(status)));
        self
    }

    pub fn with_failure(mut self, path: &str, message: &str) -> Self {
        self.routes.insert(path.to_string(), Err(message.to_string()));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.get()
    }
}

#[async_trait(?Send)]
impl Transport for MemoryTransport {
    async fn get(&self, path: &str) -> Result<TransportResponse, FetchError> {
        self.requests.set(self.requests.get() + 1);
        match self.routes.get(path) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(FetchError::Transport(message.clone())),
            None => Ok(TransportResponse::with_status(404)),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use static_dir::StaticDirTransport;

#[cfg(not(target_arch = "wasm32"))]
mod static_dir {
    use super::{Transport, TransportResponse};
    use crate::error::FetchError;
    use async_trait::async_trait;
    use std::io::ErrorKind;
    use std::path::{Component, Path, PathBuf};

    /// Serves endpoint paths from a directory of JSON files (the site root)
    #[derive(Debug, Clone)]
    pub struct StaticDirTransport {
        root: PathBuf,
    }

    impl StaticDirTransport {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        /// Map a URL path onto the root; anything escaping it is rejected
        fn resolve(&self, path: &str) -> Option<PathBuf> {
            let relative = Path::new(path.trim_start_matches('/'));
            if relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
            {
                return None;
            }
            Some(self.root.join(relative))
        }
    }

    #[async_trait(?Send)]
    impl Transport for StaticDirTransport {
        async fn get(&self, path: &str) -> Result<TransportResponse, FetchError> {
            let Some(file) = self.resolve(path) else {
                return Ok(TransportResponse::with_status(404));
            };
            match std::fs::read_to_string(&file) {
                Ok(body) => Ok(TransportResponse::ok(body)),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    Ok(TransportResponse::with_status(404))
                }
                Err(e) => Err(FetchError::Transport(format!(
                    "{}: {}",
                    file.display(),
                    e
                ))),
            }
        }
    }
}
