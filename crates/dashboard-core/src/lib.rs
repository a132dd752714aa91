//! Contract dashboard engines
//!
//! Platform-independent state for the ContractX dashboard:
//! - `api`: one-shot reads of the static contract endpoints
//! - `filter` / `pagination` / `dashboard`: search, filter and page the table
//! - `upload` / `scheduler`: the simulated upload with injectable timers
//! - `session`: mock sign-in and theme preference
//! - `detail` / `shell`: detail page and two-screen navigation

pub mod api;
pub mod config;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod scheduler;
pub mod session;
pub mod shell;
pub mod upload;

pub use api::{ApiEndpoints, ContractApi, MemoryTransport, Transport, TransportResponse};
#[cfg(not(target_arch = "wasm32"))]
pub use api::StaticDirTransport;
pub use config::{DashboardConfig, StorageKeys, UploadSimulationConfig};
pub use dashboard::{ContractsDashboard, DashboardView, LoadState, Notice};
pub use detail::{ContractDetailView, DetailState, DetailView};
pub use error::{AuthError, ConfigError, FetchError, StoreError};
pub use filter::{FilterState, RiskFilter, Selection, StatusFilter};
pub use pagination::{PageState, PageSummary};
pub use scheduler::{Scheduler, Task, VirtualScheduler};
pub use session::{AppState, KeyValueStore, LoginForm, MemoryStore, Theme};
pub use shell::{Route, Screen, Shell};
pub use upload::{
    FileId, OutcomeSource, RandomOutcomes, Resolution, ScriptedOutcomes, UploadFile, UploadPanel,
    UploadQueue, UploadStatus,
};
