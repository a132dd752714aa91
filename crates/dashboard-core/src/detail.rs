//! Single-contract page with its evidence drawer

use crate::api::{ContractApi, Transport};
use contract_types::{percent, ConfidenceBand, ContractDetail, RiskLevel};
use serde::Serialize;

pub const DETAIL_UNAVAILABLE: &str = "Could not load contract details.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready(Box<ContractDetail>),
    /// Not found and fetch failure look the same from here
    Unavailable,
}

#[derive(Debug)]
pub struct ContractDetailView {
    contract_id: String,
    state: DetailState,
    evidence_open: bool,
}

impl ContractDetailView {
    pub fn new(contract_id: &str) -> Self {
        Self {
            contract_id: contract_id.to_string(),
            state: DetailState::Loading,
            evidence_open: false,
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Always re-fetches; nothing is cached between visits
    pub async fn load<T: Transport>(&mut self, api: &ContractApi<T>) {
        self.state = DetailState::Loading;
        let detail = api.fetch_contract_detail(&self.contract_id).await;
        self.apply(detail);
    }

    pub fn apply(&mut self, detail: Option<ContractDetail>) {
        self.state = match detail {
            Some(detail) => DetailState::Ready(Box::new(detail)),
            None => DetailState::Unavailable,
        };
    }

    pub fn is_evidence_open(&self) -> bool {
        self.evidence_open
    }

    pub fn open_evidence(&mut self) {
        self.evidence_open = true;
    }

    pub fn close_evidence(&mut self) {
        self.evidence_open = false;
    }

    pub fn view(&self) -> DetailView<'_> {
        match &self.state {
            DetailState::Loading => DetailView::Loading,
            DetailState::Unavailable => DetailView::Unavailable {
                message: DETAIL_UNAVAILABLE,
            },
            DetailState::Ready(detail) => DetailView::Ready(ReadyDetail::new(
                detail,
                self.evidence_open,
            )),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DetailView<'a> {
    Loading,
    Unavailable { message: &'static str },
    Ready(ReadyDetail<'a>),
}

#[derive(Debug, Serialize)]
pub struct ReadyDetail<'a> {
    pub contract: &'a ContractDetail,
    pub risk_label: String,
    pub clauses: Vec<ClauseRow<'a>>,
    pub insights: Vec<InsightRow<'a>>,
    pub evidence_open: bool,
    pub evidence: Vec<EvidenceRow<'a>>,
}

impl<'a> ReadyDetail<'a> {
    fn new(detail: &'a ContractDetail, evidence_open: bool) -> Self {
        Self {
            contract: detail,
            risk_label: format!("{} Risk", detail.summary.risk),
            clauses: detail
                .clauses
                .iter()
                .map(|c| ClauseRow {
                    title: &c.title,
                    summary: &c.summary,
                    confidence_percent: percent(c.confidence),
                    band: ConfidenceBand::from_score(c.confidence),
                })
                .collect(),
            insights: detail
                .insights
                .iter()
                .map(|i| InsightRow {
                    risk: i.risk,
                    alert: i.risk == RiskLevel::High,
                    message: &i.message,
                })
                .collect(),
            evidence_open,
            evidence: detail
                .evidence
                .iter()
                .map(|e| EvidenceRow {
                    source: &e.source,
                    relevance_percent: percent(e.relevance),
                    snippet: &e.snippet,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClauseRow<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub confidence_percent: u32,
    pub band: ConfidenceBand,
}

#[derive(Debug, Serialize)]
pub struct InsightRow<'a> {
    pub risk: RiskLevel,
    /// High-risk insights get the alert icon
    pub alert: bool,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EvidenceRow<'a> {
    pub source: &'a str,
    pub relevance_percent: u32,
    pub snippet: &'a str,
}
