//! Contracts table view-model
//!
//! Owns the fetched list, the filter inputs and the current page. Every filter
//! change sends the user back to page 1.

use crate::api::{ContractApi, Transport};
use crate::error::FetchError;
use crate::filter::{FilterState, RiskFilter, StatusFilter};
use crate::pagination::{page_slice, total_pages, PageState, PageSummary};
use contract_types::ContractSummary;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Ready,
    /// The endpoint answered with an empty list
    Empty,
    Failed(String),
}

/// Title and detail line for a full-panel message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub detail: &'static str,
}

pub const LOAD_FAILED: Notice = Notice {
    title: "Failed to load contracts.",
    detail: "Please try again later.",
};

pub const NO_CONTRACTS: Notice = Notice {
    title: "No contracts yet.",
    detail: "Upload your first contract to get started.",
};

pub const NO_MATCHES: &str = "No contracts match your search or filters.";

#[derive(Debug)]
pub struct ContractsDashboard {
    contracts: Vec<ContractSummary>,
    load_state: LoadState,
    filter: FilterState,
    page: PageState,
}

impl Default for ContractsDashboard {
    fn default() -> Self {
        Self::new(crate::pagination::DEFAULT_PAGE_SIZE)
    }
}

impl ContractsDashboard {
    pub fn new(page_size: usize) -> Self {
        Self {
            contracts: Vec::new(),
            load_state: LoadState::Loading,
            filter: FilterState::default(),
            page: PageState::new(page_size),
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn contracts(&self) -> &[ContractSummary] {
        &self.contracts
    }

    pub fn current_page(&self) -> usize {
        self.page.current()
    }

    /// Fetch the list and settle into Ready, Empty or Failed
    pub async fn load<T: Transport>(&mut self, api: &ContractApi<T>) {
        self.begin_loading();
        let result = api.fetch_contract_list().await;
        self.apply_fetch_result(result);
    }

    pub fn begin_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub fn apply_fetch_result(&mut self, result: Result<Vec<ContractSummary>, FetchError>) {
        match result {
            Ok(contracts) => {
                self.load_state = if contracts.is_empty() {
                    LoadState::Empty
                } else {
                    LoadState::Ready
                };
                self.contracts = contracts;
                self.page.clamp(self.total_pages());
            }
            Err(e) => {
                warn!("Failed to load contracts: {}", e);
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.to_string();
        self.page.reset();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
        self.page.reset();
    }

    pub fn set_risk_filter(&mut self, risk: RiskFilter) {
        self.filter.risk = risk;
        self.page.reset();
    }

    pub fn filtered(&self) -> Vec<&ContractSummary> {
        self.filter.apply(&self.contracts)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page.page_size())
    }

    /// Ignored outside `1..=total_pages`
    pub fn go_to_page(&mut self, n: usize) -> bool {
        let moved = self.page.go_to(n, self.total_pages());
        if moved {
            debug!("Contracts table moved to page {}", n);
        }
        moved
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.current() + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.page.current().checked_sub(1) {
            Some(n) => self.go_to_page(n),
            None => false,
        }
    }

    pub fn clamp_page(&mut self) {
        self.page.clamp(self.total_pages());
    }

    pub fn view(&self) -> DashboardView<'_> {
        let filtered = self.filtered();
        let rows = page_slice(&filtered, self.page.current(), self.page.page_size()).to_vec();
        let page = PageSummary::new(&self.page, filtered.len());
        let notice = match self.load_state {
            LoadState::Failed(_) => Some(LOAD_FAILED),
            LoadState::Empty => Some(NO_CONTRACTS),
            _ => None,
        };
        DashboardView {
            load_state: &self.load_state,
            notice,
            no_matches: self.load_state == LoadState::Ready && filtered.is_empty(),
            rows,
            page,
        }
    }
}

/// Render-ready snapshot of the dashboard
#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub load_state: &'a LoadState,
    pub notice: Option<Notice>,
    pub no_matches: bool,
    pub rows: Vec<&'a ContractSummary>,
    pub page: PageSummary,
}
