//! Layered Pattern Detector
//!
//! Five independent detection layers over one snapshot. Each layer is a
//! pure function, capped at `layer_cap` results, and degrades to an empty
//! result when the fields it depends on are missing from the feed - a
//! layer never fails and never affects another layer.
//!
//! - L1 high-frequency: outbound count over threshold
//! - L2 large-amount: a single outlier transaction, not cumulative volume
//! - L3 multi-identity: one declared owner behind several accounts
//! - L4 circular flow: directed cycles in the transfer graph
//! - L5 rapid movement: funds received then forwarded within a window

use crate::analytics::AnalyticsConfig;
use crate::models::transaction::{Transaction, UNKNOWN_ACCOUNT};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod graph;

use graph::{find_cycles, FlowGraph};

/// One detected circular flow
///
/// Accounts are in cycle order, closed (first == last), rotated so the
/// lexicographically smallest account leads. `total_value` sums the
/// amounts moved along the cycle's edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleFlag {
    /// Account ids in cycle order (includes closing: first == last)
    pub accounts: Vec<String>,

    /// Total value moved along the cycle's edges (minor units)
    pub total_value: i64,
}

/// One detected pass-through conduit
///
/// The account received `amount_in` and forwarded `amount_out` (equal or
/// lesser) within the configured window; the flagged path is
/// source → account → destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConduitFlag {
    /// The conduit account
    pub account: String,

    /// Where the inbound transfer came from
    pub source: String,

    /// Where the outbound transfer went
    pub destination: String,

    /// Inbound amount (minor units)
    pub amount_in: i64,

    /// Outbound amount (minor units)
    pub amount_out: i64,

    /// Seconds between the inbound and outbound transfers
    pub elapsed_secs: i64,
}

/// Results of all five layers for one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayeredAnalysis {
    /// L1: accounts with outbound count over the frequency threshold
    pub layer1_high_frequency: Vec<String>,

    /// L2: accounts party to at least one outlier transaction
    pub layer2_large_amounts: Vec<String>,

    /// L3: accounts sharing a declared owner with another account
    pub layer3_multi_identity: Vec<String>,

    /// L4: detected circular flows
    pub layer4_circular: Vec<CycleFlag>,

    /// L5: detected pass-through conduits
    pub layer5_rapid_movement: Vec<ConduitFlag>,
}

/// Run all five layers
///
/// # Example
/// ```
/// use fintrace_core_rs::{detect_layers, AnalyticsConfig, Transaction};
///
/// let snapshot = vec![Transaction::new(
///     "CASE_1".to_string(),
///     "A".to_string(),
///     "B".to_string(),
///     Some(75_000),
/// )];
///
/// let layers = detect_layers(&snapshot, &AnalyticsConfig::default());
/// assert_eq!(layers.layer2_large_amounts, vec!["A", "B"]);
/// assert!(layers.layer4_circular.is_empty());
/// ```
pub fn detect_layers(snapshot: &[Transaction], config: &AnalyticsConfig) -> LayeredAnalysis {
    LayeredAnalysis {
        layer1_high_frequency: detect_high_frequency(snapshot, config),
        layer2_large_amounts: detect_large_amounts(snapshot, config),
        layer3_multi_identity: detect_multi_identity(snapshot, config),
        layer4_circular: detect_circular_flows(snapshot, config),
        layer5_rapid_movement: detect_rapid_movement(snapshot, config),
    }
}

/// L1: accounts whose outbound count strictly exceeds the threshold
///
/// Ordered by count descending, account id ascending on ties.
pub fn detect_high_frequency(snapshot: &[Transaction], config: &AnalyticsConfig) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tx in snapshot {
        *counts.entry(tx.from_account()).or_insert(0) += 1;
    }

    let mut flagged: Vec<(&str, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count > config.frequency_threshold)
        .collect();

    flagged.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    flagged
        .into_iter()
        .take(config.layer_cap)
        .map(|(account, _)| account.to_string())
        .collect()
}

/// L2: accounts party to at least one transaction whose amount strictly
/// exceeds the single-transaction threshold
///
/// Flags on one outlier transfer, not cumulative volume; both endpoints
/// of the outlier are flagged (the sentinel never is). Ordered by the
/// account's largest offending amount descending, id ascending on ties.
pub fn detect_large_amounts(snapshot: &[Transaction], config: &AnalyticsConfig) -> Vec<String> {
    let mut peak: BTreeMap<&str, i64> = BTreeMap::new();

    for tx in snapshot {
        let amount = tx.amount_or_zero();
        if amount <= config.single_tx_threshold {
            continue;
        }
        for account in [tx.from_account(), tx.to_account()] {
            if account != UNKNOWN_ACCOUNT {
                let entry = peak.entry(account).or_insert(0);
                *entry = (*entry).max(amount);
            }
        }
    }

    let mut flagged: Vec<(&str, i64)> = peak.into_iter().collect();
    flagged.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    flagged
        .into_iter()
        .take(config.layer_cap)
        .map(|(account, _)| account.to_string())
        .collect()
}

/// L3: accounts sharing a declared owner identity across two or more
/// distinct account ids
///
/// Groups originating accounts by the feed's `owner_id` attribute and
/// flags every group of size > 1. Feeds without the attribute produce an
/// empty result - the layer degrades rather than guessing an identity
/// key. Groups are emitted largest first (owner key ascending on ties),
/// accounts within a group ascending.
pub fn detect_multi_identity(snapshot: &[Transaction], config: &AnalyticsConfig) -> Vec<String> {
    let mut groups: BTreeMap<&str, std::collections::BTreeSet<&str>> = BTreeMap::new();

    for tx in snapshot {
        if let Some(owner) = tx.owner_id() {
            groups.entry(owner).or_default().insert(tx.from_account());
        }
    }

    let mut multi: Vec<(&str, Vec<&str>)> = groups
        .into_iter()
        .filter(|(_, accounts)| accounts.len() > 1)
        .map(|(owner, accounts)| (owner, accounts.into_iter().collect()))
        .collect();

    multi.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));

    let mut flagged: Vec<String> = Vec::new();
    for (_, accounts) in multi {
        for account in accounts {
            if flagged.len() >= config.layer_cap {
                return flagged;
            }
            flagged.push(account.to_string());
        }
    }
    flagged
}

/// L4: directed cycles in the account transfer graph
///
/// Bounded stack-based DFS over the snapshot's flow graph (see
/// [`graph`]); self-loops and sentinel endpoints never enter the graph.
/// Each distinct cycle is reported once, rooted at its smallest account.
pub fn detect_circular_flows(snapshot: &[Transaction], config: &AnalyticsConfig) -> Vec<CycleFlag> {
    let flow = FlowGraph::from_snapshot(snapshot);
    let cycles = find_cycles(&flow, config.max_cycle_depth, config.layer_cap);

    cycles
        .into_iter()
        .map(|indices| {
            let mut total_value: i64 = 0;
            for (pos, &from) in indices.iter().enumerate() {
                let to = indices[(pos + 1) % indices.len()];
                total_value += flow.edge_amount(from, to).unwrap_or(0);
            }

            let mut accounts: Vec<String> = indices
                .iter()
                .filter_map(|&idx| flow.account_by_index(idx).map(|s| s.to_string()))
                .collect();
            // Closed form, matching how review tooling renders cycles
            if let Some(first) = accounts.first().cloned() {
                accounts.push(first);
            }

            CycleFlag { accounts, total_value }
        })
        .collect()
}

/// L5: pass-through conduits
///
/// For each account, inbound and outbound transfers are sorted by
/// timestamp and scanned for an outbound of equal or lesser (non-zero)
/// amount within `rapid_window_secs` after an inbound. Untimestamped and
/// unpriced rows are skipped. One flag per account (the earliest
/// qualifying pair), ordered by account id.
pub fn detect_rapid_movement(snapshot: &[Transaction], config: &AnalyticsConfig) -> Vec<ConduitFlag> {
    // (timestamp, amount, counterparty), grouped per account
    type Leg<'a> = (DateTime<Utc>, i64, &'a str);
    let mut inbound: BTreeMap<&str, Vec<Leg>> = BTreeMap::new();
    let mut outbound: BTreeMap<&str, Vec<Leg>> = BTreeMap::new();

    for tx in snapshot {
        let Some(ts) = tx.timestamp() else {
            continue;
        };
        let amount = tx.amount_or_zero();
        // Self-transfers would pair with themselves and read as conduits
        if amount == 0 || tx.from_account() == tx.to_account() {
            continue;
        }
        inbound
            .entry(tx.to_account())
            .or_default()
            .push((ts, amount, tx.from_account()));
        outbound
            .entry(tx.from_account())
            .or_default()
            .push((ts, amount, tx.to_account()));
    }

    let window = Duration::seconds(config.rapid_window_secs);
    let mut flags: Vec<ConduitFlag> = Vec::new();

    for (account, incoming) in &mut inbound {
        let Some(outgoing) = outbound.get_mut(account) else {
            continue;
        };
        incoming.sort_by_key(|leg| leg.0);
        outgoing.sort_by_key(|leg| leg.0);

        'scan: for &(in_ts, in_amount, in_source) in incoming.iter() {
            for &(out_ts, out_amount, out_dest) in outgoing.iter() {
                if out_ts < in_ts {
                    continue;
                }
                if out_ts - in_ts > window {
                    break; // outgoing sorted; nothing later can qualify
                }
                if out_amount <= in_amount {
                    flags.push(ConduitFlag {
                        account: account.to_string(),
                        source: in_source.to_string(),
                        destination: out_dest.to_string(),
                        amount_in: in_amount,
                        amount_out: out_amount,
                        elapsed_secs: (out_ts - in_ts).num_seconds(),
                    });
                    break 'scan;
                }
            }
        }

        if flags.len() >= config.layer_cap {
            break;
        }
    }

    flags.truncate(config.layer_cap);
    flags
}
