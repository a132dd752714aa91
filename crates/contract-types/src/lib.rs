pub mod display;
pub mod types;

pub use display::{percent, ConfidenceBand};
pub use types::{
    Clause, ContractDetail, ContractStatus, ContractSummary, EvidenceItem, Insight, ParseLabelError,
    RiskLevel,
};
