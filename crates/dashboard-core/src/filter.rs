//! Search and categorical filters for the contracts table
//!
//! Each filter is an independent per-record predicate; a record is visible iff
//! it passes all three, so the order they are applied in never matters.

use contract_types::{ContractStatus, ContractSummary, ParseLabelError, RiskLevel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// "All" or one specific value of a categorical column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("All"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr<Err = ParseLabelError>> FromStr for Selection<T> {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

pub type StatusFilter = Selection<ContractStatus>;
pub type RiskFilter = Selection<RiskLevel>;

/// One entry of a filter `<select>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn status_options() -> Vec<FilterOption> {
    std::iter::once(FilterOption {
        value: "All",
        label: "All Statuses",
    })
    .chain(ContractStatus::ALL.iter().map(|s| FilterOption {
        value: s.label(),
        label: s.label(),
    }))
    .collect()
}

pub fn risk_options() -> Vec<FilterOption> {
    std::iter::once(FilterOption {
        value: "All",
        label: "All Risks",
    })
    .chain(RiskLevel::ALL.iter().map(|r| FilterOption {
        value: r.label(),
        label: r.label(),
    }))
    .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub status: StatusFilter,
    pub risk: RiskFilter,
}

impl FilterState {
    pub fn new(query: &str, status: StatusFilter, risk: RiskFilter) -> Self {
        Self {
            query: query.to_string(),
            status,
            risk,
        }
    }

    /// Case-insensitive substring match on name or parties; empty query matches all
    pub fn matches_query(&self, contract: &ContractSummary) -> bool {
        QueryMatcher::new(&self.query).matches(contract)
    }

    pub fn matches_status(&self, contract: &ContractSummary) -> bool {
        self.status.accepts(&contract.status)
    }

    pub fn matches_risk(&self, contract: &ContractSummary) -> bool {
        self.risk.accepts(&contract.risk)
    }

    pub fn matches(&self, contract: &ContractSummary) -> bool {
        self.matches_query(contract) && self.matches_status(contract) && self.matches_risk(contract)
    }

    /// Records passing every predicate, in input order
    pub fn apply<'a>(&self, contracts: &'a [ContractSummary]) -> Vec<&'a ContractSummary> {
        let query = QueryMatcher::new(&self.query);
        contracts
            .iter()
            .filter(|c| query.matches(c) && self.matches_status(c) && self.matches_risk(c))
            .collect()
    }
}

/// Lower-cases the needle once per pass instead of once per record
struct QueryMatcher {
    needle: String,
}

impl QueryMatcher {
    fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    fn matches(&self, contract: &ContractSummary) -> bool {
        self.needle.is_empty()
            || contract.name.to_lowercase().contains(&self.needle)
            || contract.parties.to_lowercase().contains(&self.needle)
    }
}
