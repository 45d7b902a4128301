//! Graph builder integration tests
//!
//! Covers the projection contract: sentinel exclusion, edge and node
//! caps, classifier-driven coloring through the engine path, and
//! payload determinism.

use fintrace_core_rs::{
    AnalyticsConfig, AnalyticsEngine, MemorySource, Transaction, TransactionFilter,
    UNKNOWN_ACCOUNT,
};

fn tx(from: &str, to: &str, amount: i64) -> Transaction {
    Transaction::new(
        "CASE_1".to_string(),
        from.to_string(),
        to.to_string(),
        Some(amount),
    )
}

fn engine(snapshot: Vec<Transaction>) -> AnalyticsEngine<MemorySource> {
    AnalyticsEngine::new(MemorySource::new(snapshot))
}

#[test]
fn test_unknown_endpoints_never_enter_the_map() {
    let config = AnalyticsConfig::default();
    let snapshot = vec![
        tx("A", "B", 10_000),
        tx(UNKNOWN_ACCOUNT, "B", 10_000),
        tx("A", UNKNOWN_ACCOUNT, 10_000),
    ];

    let report = engine(snapshot).spider_map(&TransactionFilter::default(), &config);

    assert_eq!(report.edges.len(), 1);
    assert_eq!(report.nodes.len(), 2);
    assert!(report.nodes.iter().all(|n| n.data.id != UNKNOWN_ACCOUNT));
}

#[test]
fn test_suspicious_nodes_colored_from_classifier() {
    let config = AnalyticsConfig::default(); // amount_threshold = 100_000

    let snapshot = vec![tx("HOT", "COLD", 150_000), tx("COLD", "WARM", 10)];
    let report = engine(snapshot).spider_map(&TransactionFilter::default(), &config);

    let class_of = |id: &str| {
        report
            .nodes
            .iter()
            .find(|n| n.data.id == id)
            .map(|n| n.data.classification.clone())
            .unwrap()
    };

    assert_eq!(class_of("HOT"), "suspicious");
    assert_eq!(class_of("COLD"), "normal");
    assert_eq!(class_of("WARM"), "normal");
}

#[test]
fn test_edge_cap_truncates_sample() {
    let config = AnalyticsConfig {
        edge_cap: 3,
        ..Default::default()
    };
    let snapshot: Vec<Transaction> = (0..10)
        .map(|i| tx(&format!("S{}", i), &format!("T{}", i), 100))
        .collect();

    let report = engine(snapshot).spider_map(&TransactionFilter::default(), &config);
    assert_eq!(report.edges.len(), 3);
}

#[test]
fn test_node_cap_is_independent_of_edges() {
    let config = AnalyticsConfig {
        edge_cap: 100,
        node_cap: 4,
        ..Default::default()
    };
    let snapshot: Vec<Transaction> = (0..10)
        .map(|i| tx(&format!("S{}", i), &format!("T{}", i), 100))
        .collect();

    let report = engine(snapshot).spider_map(&TransactionFilter::default(), &config);
    assert_eq!(report.edges.len(), 10);
    assert_eq!(report.nodes.len(), 4);

    // First-seen order from the edge sample
    let ids: Vec<&str> = report.nodes.iter().map(|n| n.data.id.as_str()).collect();
    assert_eq!(ids, vec!["S0", "T0", "S1", "T1"]);
}

#[test]
fn test_identical_snapshot_identical_payload() {
    let config = AnalyticsConfig::default();
    let snapshot = vec![
        tx("C", "A", 5_000),
        tx("B", "A", 3_000),
        tx("A", "C", 150_000),
    ];

    let first = engine(snapshot.clone()).spider_map(&TransactionFilter::default(), &config);
    let second = engine(snapshot).spider_map(&TransactionFilter::default(), &config);

    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.edges, second.edges);
}

#[test]
fn test_serialized_payload_shape() {
    let config = AnalyticsConfig::default();
    let report = engine(vec![tx("A", "B", 42)]).spider_map(&TransactionFilter::default(), &config);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["nodes"][0]["data"]["id"], "A");
    assert_eq!(json["nodes"][0]["data"]["classification"], "normal");
    assert_eq!(json["edges"][0]["data"]["source"], "A");
    assert_eq!(json["edges"][0]["data"]["target"], "B");
    assert_eq!(json["edges"][0]["data"]["weight"], 42);
    assert!(json.get("error").is_none());
}
