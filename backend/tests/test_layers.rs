//! Layered detector integration tests (L1-L3)
//!
//! Cycle detection and rapid movement have their own test files; this one
//! covers the frequency, outlier, and multi-identity layers plus layer
//! independence and caps.

use fintrace_core_rs::{detect_layers, AnalyticsConfig, Transaction};

fn tx(from: &str, to: &str, amount: i64) -> Transaction {
    Transaction::new(
        "CASE_1".to_string(),
        from.to_string(),
        to.to_string(),
        Some(amount),
    )
}

fn owned(from: &str, to: &str, amount: i64, owner: &str) -> Transaction {
    tx(from, to, amount).with_owner(owner.to_string())
}

#[test]
fn test_l1_flags_only_past_frequency_threshold() {
    let config = AnalyticsConfig::default(); // frequency_threshold = 20

    let mut snapshot: Vec<Transaction> = (0..21).map(|_| tx("BUSY", "SINK", 100)).collect();
    snapshot.extend((0..20).map(|_| tx("CALM", "SINK", 100)));

    let layers = detect_layers(&snapshot, &config);
    assert_eq!(layers.layer1_high_frequency, vec!["BUSY"]);
}

#[test]
fn test_l1_ordering_and_cap() {
    let config = AnalyticsConfig {
        frequency_threshold: 1,
        layer_cap: 2,
        ..Default::default()
    };

    let mut snapshot: Vec<Transaction> = (0..4).map(|_| tx("A", "SINK", 1)).collect();
    snapshot.extend((0..3).map(|_| tx("B", "SINK", 1)));
    snapshot.extend((0..2).map(|_| tx("C", "SINK", 1)));

    let layers = detect_layers(&snapshot, &config);
    // Count descending; C (count 2) falls past the cap
    assert_eq!(layers.layer1_high_frequency, vec!["A", "B"]);
}

#[test]
fn test_l2_is_single_outlier_not_cumulative() {
    let config = AnalyticsConfig::default(); // single_tx_threshold = 50_000

    // 60_000 cumulative over two transfers: no single outlier
    let snapshot = vec![tx("A", "B", 30_000), tx("A", "B", 30_000)];
    let layers = detect_layers(&snapshot, &config);
    assert!(layers.layer2_large_amounts.is_empty());

    // One 50_001 transfer: both parties flagged, exactly once each
    let snapshot = vec![tx("A", "B", 50_001), tx("A", "B", 50_001)];
    let layers = detect_layers(&snapshot, &config);
    assert_eq!(layers.layer2_large_amounts, vec!["A", "B"]);
}

#[test]
fn test_l2_exact_threshold_not_flagged() {
    let config = AnalyticsConfig::default();
    let layers = detect_layers(&[tx("A", "B", 50_000)], &config);
    assert!(layers.layer2_large_amounts.is_empty());
}

#[test]
fn test_l3_flags_every_account_in_shared_owner_group() {
    let config = AnalyticsConfig::default();

    let snapshot = vec![
        owned("A1", "X", 100, "OWNER_1"),
        owned("A2", "X", 100, "OWNER_1"),
        owned("A3", "X", 100, "OWNER_1"),
        owned("B1", "X", 100, "OWNER_2"), // singleton group: not flagged
        tx("C1", "X", 100),               // no identity attribute at all
    ];

    let layers = detect_layers(&snapshot, &config);
    assert_eq!(layers.layer3_multi_identity, vec!["A1", "A2", "A3"]);
}

#[test]
fn test_l3_empty_feed_attribute_degrades_to_empty() {
    let config = AnalyticsConfig::default();
    let snapshot = vec![tx("A", "B", 100), tx("C", "D", 100), tx("E", "F", 100)];

    let layers = detect_layers(&snapshot, &config);
    assert!(layers.layer3_multi_identity.is_empty());
}

#[test]
fn test_l3_larger_groups_rank_first() {
    let config = AnalyticsConfig {
        layer_cap: 3,
        ..Default::default()
    };

    let snapshot = vec![
        owned("Z1", "X", 100, "PAIR"),
        owned("Z2", "X", 100, "PAIR"),
        owned("M1", "X", 100, "TRIO"),
        owned("M2", "X", 100, "TRIO"),
        owned("M3", "X", 100, "TRIO"),
    ];

    let layers = detect_layers(&snapshot, &config);
    assert_eq!(layers.layer3_multi_identity, vec!["M1", "M2", "M3"]);
}

#[test]
fn test_empty_snapshot_empties_every_layer() {
    let layers = detect_layers(&[], &AnalyticsConfig::default());
    assert!(layers.layer1_high_frequency.is_empty());
    assert!(layers.layer2_large_amounts.is_empty());
    assert!(layers.layer3_multi_identity.is_empty());
    assert!(layers.layer4_circular.is_empty());
    assert!(layers.layer5_rapid_movement.is_empty());
}
