//! Graph Builder - spider map projection
//!
//! Projects a bounded sample of the snapshot into the node/edge payload
//! the network view renders. No graph algorithms run here (cycle
//! detection is the layered detector's job); this is purely a
//! transport-sized projection, and it is deterministic: the same snapshot
//! always produces the same payload, in the same order.

use crate::analytics::AnalyticsConfig;
use crate::models::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Node classification rendered by the UI
pub const CLASS_SUSPICIOUS: &str = "suspicious";
/// Default node classification
pub const CLASS_NORMAL: &str = "normal";

/// Node payload, nested under `data` for the rendering library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiderNode {
    pub data: NodeData,
}

/// Node attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    /// Account id
    pub id: String,

    /// `"suspicious"` when the classifier flagged the account, else `"normal"`
    pub classification: String,
}

/// Edge payload, nested under `data` for the rendering library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiderEdge {
    pub data: EdgeData,
}

/// Edge attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Originating account id
    pub source: String,

    /// Receiving account id
    pub target: String,

    /// Transfer amount in minor units (0 when the feed row had none)
    pub weight: i64,
}

/// Size-bounded visualization payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<SpiderNode>,
    pub edges: Vec<SpiderEdge>,
}

/// Project a snapshot into a bounded graph view
///
/// The first `edge_cap` transfers with resolved endpoints become edges in
/// snapshot order. Nodes are the union of sampled edge endpoints in
/// first-seen order, capped at `node_cap` independently of the edge
/// count. Selection is insertion-ordered, never random, so repeated calls
/// on one snapshot are identical.
///
/// # Example
/// ```
/// use std::collections::BTreeSet;
/// use fintrace_core_rs::{build_graph_view, AnalyticsConfig, Transaction};
///
/// let snapshot = vec![Transaction::new(
///     "CASE_1".to_string(),
///     "A".to_string(),
///     "B".to_string(),
///     Some(100_000),
/// )];
/// let flagged: BTreeSet<String> = BTreeSet::from(["A".to_string()]);
///
/// let view = build_graph_view(&snapshot, &flagged, &AnalyticsConfig::default());
/// assert_eq!(view.nodes[0].data.classification, "suspicious");
/// assert_eq!(view.edges[0].data.weight, 100_000);
/// ```
pub fn build_graph_view(
    snapshot: &[Transaction],
    flagged: &BTreeSet<String>,
    config: &AnalyticsConfig,
) -> GraphView {
    let mut edges: Vec<SpiderEdge> = Vec::new();
    let mut node_order: Vec<&str> = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for tx in snapshot {
        if edges.len() >= config.edge_cap {
            break;
        }
        if !tx.has_known_endpoints() {
            continue;
        }

        for endpoint in [tx.from_account(), tx.to_account()] {
            if seen.insert(endpoint) {
                node_order.push(endpoint);
            }
        }

        edges.push(SpiderEdge {
            data: EdgeData {
                source: tx.from_account().to_string(),
                target: tx.to_account().to_string(),
                weight: tx.amount_or_zero(),
            },
        });
    }

    let nodes = node_order
        .into_iter()
        .take(config.node_cap)
        .map(|account| {
            let classification = if flagged.contains(account) {
                CLASS_SUSPICIOUS
            } else {
                CLASS_NORMAL
            };
            SpiderNode {
                data: NodeData {
                    id: account.to_string(),
                    classification: classification.to_string(),
                },
            }
        })
        .collect();

    GraphView { nodes, edges }
}
