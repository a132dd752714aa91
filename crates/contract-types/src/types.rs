use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} label: {label}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}

/// Lifecycle status of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    #[serde(rename = "Renewal Due")]
    RenewalDue,
    Expired,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 3] = [
        ContractStatus::Active,
        ContractStatus::RenewalDue,
        ContractStatus::Expired,
    ];

    /// Label as it appears in the JSON feed and the status badge
    pub fn label(&self) -> &'static str {
        match self {
            ContractStatus::Active => "Active",
            ContractStatus::RenewalDue => "Renewal Due",
            ContractStatus::Expired => "Expired",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContractStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "status",
                label: s.to_string(),
            })
    }
}

/// Categorical risk severity for a contract or an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskLevel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskLevel::ALL
            .into_iter()
            .find(|risk| risk.label() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "risk",
                label: s.to_string(),
            })
    }
}

/// One row of the contracts list (`/contracts.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSummary {
    pub id: String,
    pub name: String,
    pub parties: String,
    pub expiry: NaiveDate,
    pub status: ContractStatus,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub title: String,
    pub summary: String,
    pub confidence: f64, // 0.0 ..= 1.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub risk: RiskLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub source: String,
    pub relevance: f64, // 0.0 ..= 1.0
    pub snippet: String,
}

/// Full contract record (`/{id}.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDetail {
    #[serde(flatten)]
    pub summary: ContractSummary,
    pub start: NaiveDate,
    #[serde(default)]
    pub clauses: Vec<Clause>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
}

impl ContractDetail {
    pub fn id(&self) -> &str {
        &self.summary.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_deserializes_renewal_due_label() {
        let json = r#"{
            "id": "c-102",
            "name": "Vendor Agreement",
            "parties": "Acme Corp & Globex",
            "expiry": "2025-03-31",
            "status": "Renewal Due",
            "risk": "Medium"
        }"#;
        let summary: ContractSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.status, ContractStatus::RenewalDue);
        assert_eq!(summary.risk, RiskLevel::Medium);
        assert_eq!(summary.expiry, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{"id":"1","name":"n","parties":"p","expiry":"2025-01-01","status":"Pending","risk":"Low"}"#;
        assert!(serde_json::from_str::<ContractSummary>(json).is_err());
    }

    #[test]
    fn test_detail_flattens_summary_fields() {
        let json = r#"{
            "id": "c-101",
            "name": "MSA",
            "parties": "Initech & Umbrella",
            "start": "2023-01-01",
            "expiry": "2026-01-01",
            "status": "Active",
            "risk": "High",
            "clauses": [{"title": "Termination", "summary": "90 days notice", "confidence": 0.92}],
            "insights": [{"risk": "High", "message": "Liability cap is missing"}],
            "evidence": [{"source": "Section 4.2", "relevance": 0.81, "snippet": "either party may terminate"}]
        }"#;
        let detail: ContractDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.id(), "c-101");
        assert_eq!(detail.summary.status, ContractStatus::Active);
        assert_eq!(detail.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(detail.clauses.len(), 1);
        assert_eq!(detail.insights[0].risk, RiskLevel::High);
        assert_eq!(detail.evidence[0].source, "Section 4.2");
    }

    #[test]
    fn test_detail_collections_default_to_empty() {
        let json = r#"{"id":"c-1","name":"n","parties":"p","start":"2024-01-01","expiry":"2025-01-01","status":"Expired","risk":"Low"}"#;
        let detail: ContractDetail = serde_json::from_str(json).unwrap();
        assert!(detail.clauses.is_empty());
        assert!(detail.insights.is_empty());
        assert!(detail.evidence.is_empty());
    }

    #[test]
    fn test_labels_parse_back() {
        for status in ContractStatus::ALL {
            assert_eq!(status.label().parse::<ContractStatus>().unwrap(), status);
        }
        for risk in RiskLevel::ALL {
            assert_eq!(risk.label().parse::<RiskLevel>().unwrap(), risk);
        }
        let err = "Critical".parse::<RiskLevel>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown risk label: Critical");
    }

    #[test]
    fn test_status_serializes_with_wire_label() {
        let json = serde_json::to_string(&ContractStatus::RenewalDue).unwrap();
        assert_eq!(json, r#""Renewal Due""#);
    }
}
