//! End-to-end run of the engines against the bundled static site

use dashboard_core::{
    ApiEndpoints, ContractApi, ContractDetailView, ContractsDashboard, DetailView, LoadState,
    Selection, StaticDirTransport,
};
use contract_types::{ContractStatus, RiskLevel};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn site_api() -> ContractApi<StaticDirTransport> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../apps/contracts-web/www");
    ContractApi::new(StaticDirTransport::new(root), ApiEndpoints::default())
}

fn ids(dashboard: &ContractsDashboard) -> Vec<String> {
    dashboard.view().rows.iter().map(|c| c.id.clone()).collect()
}

#[tokio::test]
async fn test_dashboard_over_static_site() {
    let api = site_api();
    let mut dashboard = ContractsDashboard::default();
    dashboard.load(&api).await;

    assert_eq!(dashboard.load_state(), &LoadState::Ready);
    assert_eq!(dashboard.contracts().len(), 12);
    assert_eq!(dashboard.total_pages(), 2);

    assert!(dashboard.go_to_page(2));
    assert_eq!(ids(&dashboard), vec!["c-111", "c-112"]);

    dashboard.set_query("ACME");
    assert_eq!(dashboard.current_page(), 1);
    assert_eq!(ids(&dashboard), vec!["c-101", "c-102", "c-107", "c-109"]);

    dashboard.set_query("");
    dashboard.set_status_filter(Selection::Only(ContractStatus::Expired));
    dashboard.set_risk_filter(Selection::Only(RiskLevel::High));
    assert_eq!(ids(&dashboard), vec!["c-106", "c-112"]);
    assert!(!dashboard.view().page.show_controls);
}

#[tokio::test]
async fn test_detail_over_static_site() {
    let api = site_api();

    let mut found = ContractDetailView::new("c-101");
    found.load(&api).await;
    let DetailView::Ready(ready) = found.view() else {
        panic!("c-101 should load");
    };
    assert_eq!(ready.contract.summary.name, "Master Services Agreement");
    assert_eq!(ready.clauses.len(), 3);
    assert_eq!(ready.evidence[0].relevance_percent, 91);

    let mut missing = ContractDetailView::new("c-102");
    missing.load(&api).await;
    assert!(matches!(missing.view(), DetailView::Unavailable { .. }));
}
