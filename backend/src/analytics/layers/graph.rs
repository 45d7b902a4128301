//! Account transfer graph and cycle enumeration
//!
//! Projects a snapshot into a directed graph (edge a→b iff any transfer
//! moves funds a→b) and enumerates simple cycles with a bounded,
//! explicitly stack-based depth-first search - no recursion, so the depth
//! bound is the only thing limiting traversal on dense graphs.
//!
//! Key features:
//! - Deterministic vertex ordering (sorted account ids)
//! - BTreeMap-based index arena for stable account → vertex mapping
//! - Each cycle discovered once, rooted at its smallest vertex
//! - Rotation-normalized dedup as a backstop

use crate::models::transaction::Transaction;
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Flow Graph - Transfer Snapshot Projection
// ============================================================================

/// Directed account transfer graph for one snapshot
///
/// Vertices: accounts with at least one resolved transfer.
/// Edges: deduplicated direction pairs, with the total amount moved.
///
/// # Determinism
///
/// - Vertices indexed in lexicographic order
/// - Adjacency lists kept sorted
/// - Construction is order-independent (snapshot order does not affect
///   graph structure)
#[derive(Debug, Clone)]
pub struct FlowGraph {
    /// Account id → vertex index (stable, sorted)
    account_to_index: BTreeMap<String, usize>,

    /// Vertex index → account id (inverse mapping)
    index_to_account: Vec<String>,

    /// Adjacency: from_idx → to_idx → total amount (minor units)
    /// Using BTreeMap for deterministic iteration
    adj: BTreeMap<usize, BTreeMap<usize, i64>>,
}

impl FlowGraph {
    /// Create empty graph
    pub fn new() -> Self {
        Self {
            account_to_index: BTreeMap::new(),
            index_to_account: Vec::new(),
            adj: BTreeMap::new(),
        }
    }

    /// Build the transfer graph from a snapshot
    ///
    /// Rows with the UNKNOWN sentinel on either side are excluded, as are
    /// self-transfers (a→a carries no laundering signal and would surface
    /// as trivial cycles).
    pub fn from_snapshot(snapshot: &[Transaction]) -> Self {
        let mut graph = Self::new();

        // Phase 1: collect unique accounts and assign stable indices
        let mut account_set: BTreeSet<&str> = BTreeSet::new();
        for tx in snapshot {
            if tx.has_known_endpoints() && tx.from_account() != tx.to_account() {
                account_set.insert(tx.from_account());
                account_set.insert(tx.to_account());
            }
        }

        // Assign indices in lexicographic order (deterministic)
        for (idx, account) in account_set.iter().enumerate() {
            graph.account_to_index.insert(account.to_string(), idx);
            graph.index_to_account.push(account.to_string());
        }

        // Phase 2: build aggregated edges
        for tx in snapshot {
            if !tx.has_known_endpoints() || tx.from_account() == tx.to_account() {
                continue;
            }

            let from_idx = graph.account_to_index[tx.from_account()];
            let to_idx = graph.account_to_index[tx.to_account()];

            *graph
                .adj
                .entry(from_idx)
                .or_default()
                .entry(to_idx)
                .or_insert(0) += tx.amount_or_zero();
        }

        graph
    }

    /// Number of vertices in graph
    pub fn vertex_count(&self) -> usize {
        self.index_to_account.len()
    }

    /// Number of edges in graph
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(|neighbors| neighbors.len()).sum()
    }

    /// Get account id from vertex index
    pub fn account_by_index(&self, idx: usize) -> Option<&str> {
        self.index_to_account.get(idx).map(|s| s.as_str())
    }

    /// Get stable vertex index for an account
    pub fn index_of(&self, account: &str) -> Option<usize> {
        self.account_to_index.get(account).copied()
    }

    /// Total amount moved along an edge, if it exists
    pub fn edge_amount(&self, from: usize, to: usize) -> Option<i64> {
        self.adj.get(&from).and_then(|neighbors| neighbors.get(&to)).copied()
    }

    /// Outgoing neighbors of a vertex (sorted)
    pub fn out_neighbors(&self, vertex: usize) -> Vec<usize> {
        self.adj
            .get(&vertex)
            .map(|neighbors| neighbors.keys().copied().collect())
            .unwrap_or_default()
    }
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Cycle Enumeration - Bounded Iterative DFS
// ============================================================================

/// One depth-first search frame: a vertex and how far through its
/// neighbor list the search has advanced.
struct Frame {
    vertex: usize,
    next_neighbor: usize,
}

/// Enumerate simple directed cycles, as vertex-index sequences
///
/// Search runs from every vertex in sorted order, with neighbors
/// restricted to indices >= the root, so each cycle is discovered exactly
/// once - rooted at its smallest vertex, which is also the rotation
/// normalization the dedup set keys on. Path length is bounded by
/// `max_depth`; enumeration stops after `cap` cycles.
///
/// Returned sequences are open (no closing repeat); the root is element 0.
pub fn find_cycles(graph: &FlowGraph, max_depth: usize, cap: usize) -> Vec<Vec<usize>> {
    let n = graph.vertex_count();
    let mut cycles: Vec<Vec<usize>> = Vec::new();
    let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();

    if n == 0 || max_depth < 2 || cap == 0 {
        return cycles;
    }

    let mut on_path = vec![false; n];

    for root in 0..n {
        // Explicit stack instead of recursion: the depth bound stays
        // enforceable and dense graphs cannot grow the call stack.
        let mut path: Vec<usize> = vec![root];
        on_path[root] = true;
        let mut stack: Vec<Frame> = vec![Frame { vertex: root, next_neighbor: 0 }];

        while let Some(frame) = stack.last_mut() {
            let neighbors = graph.out_neighbors(frame.vertex);

            if frame.next_neighbor >= neighbors.len() {
                // Exhausted this vertex; backtrack
                stack.pop();
                if let Some(done) = path.pop() {
                    on_path[done] = false;
                }
                continue;
            }

            let next = neighbors[frame.next_neighbor];
            frame.next_neighbor += 1;

            // Only the root's component above it matters: restricting to
            // indices >= root guarantees each cycle is found at its
            // minimal vertex and nowhere else.
            if next < root {
                continue;
            }

            if next == root {
                // Closed a cycle (self-loops never reach here: a→a edges
                // are dropped at graph construction)
                if path.len() >= 2 && seen.insert(path.clone()) {
                    cycles.push(path.clone());
                    if cycles.len() >= cap {
                        return cycles;
                    }
                }
                continue;
            }

            if on_path[next] || path.len() >= max_depth {
                continue;
            }

            on_path[next] = true;
            path.push(next);
            stack.push(Frame { vertex: next, next_neighbor: 0 });
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(from: &str, to: &str, amount: i64) -> Transaction {
        Transaction::new(
            "CASE_1".to_string(),
            from.to_string(),
            to.to_string(),
            Some(amount),
        )
    }

    #[test]
    fn test_empty_graph() {
        let graph = FlowGraph::new();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(find_cycles(&graph, 8, 10).is_empty());
    }

    #[test]
    fn test_parallel_transfers_aggregate_into_one_edge() {
        let graph = FlowGraph::from_snapshot(&[tx("A", "B", 100), tx("A", "B", 50)]);
        assert_eq!(graph.edge_count(), 1);
        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("B").unwrap();
        assert_eq!(graph.edge_amount(a, b), Some(150));
    }

    #[test]
    fn test_self_loop_excluded() {
        let graph = FlowGraph::from_snapshot(&[tx("A", "A", 100), tx("A", "B", 50)]);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(find_cycles(&graph, 8, 10).is_empty());
    }

    #[test]
    fn test_unknown_endpoints_excluded() {
        let graph = FlowGraph::from_snapshot(&[tx("UNKNOWN", "B", 100), tx("B", "C", 50)]);
        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.index_of("UNKNOWN").is_none());
    }

    #[test]
    fn test_triangle_found_once() {
        let graph = FlowGraph::from_snapshot(&[tx("A", "B", 100), tx("B", "C", 100), tx("C", "A", 100)]);
        let cycles = find_cycles(&graph, 8, 10);
        assert_eq!(cycles.len(), 1);

        let accounts: Vec<&str> = cycles[0]
            .iter()
            .map(|&idx| graph.account_by_index(idx).unwrap())
            .collect();
        assert_eq!(accounts, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_two_vertex_cycle() {
        let graph = FlowGraph::from_snapshot(&[tx("A", "B", 100), tx("B", "A", 40)]);
        let cycles = find_cycles(&graph, 8, 10);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 2);
    }

    #[test]
    fn test_depth_bound_suppresses_long_cycles() {
        // Ring of 5: A→B→C→D→E→A
        let graph = FlowGraph::from_snapshot(&[
            tx("A", "B", 1),
            tx("B", "C", 1),
            tx("C", "D", 1),
            tx("D", "E", 1),
            tx("E", "A", 1),
        ]);

        assert!(find_cycles(&graph, 4, 10).is_empty());
        assert_eq!(find_cycles(&graph, 5, 10).len(), 1);
    }

    #[test]
    fn test_cycle_cap() {
        // Two disjoint 2-cycles
        let graph = FlowGraph::from_snapshot(&[
            tx("A", "B", 1),
            tx("B", "A", 1),
            tx("C", "D", 1),
            tx("D", "C", 1),
        ]);
        assert_eq!(find_cycles(&graph, 8, 1).len(), 1);
        assert_eq!(find_cycles(&graph, 8, 10).len(), 2);
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let graph = FlowGraph::from_snapshot(&[tx("A", "B", 1), tx("B", "C", 1), tx("A", "C", 1)]);
        assert!(find_cycles(&graph, 8, 10).is_empty());
    }
}
