//! Analytics components
//!
//! Four independent views over one transaction snapshot:
//! - **aggregation**: per-account rollups and scalar totals
//! - **suspicion**: threshold classification of aggregates
//! - **layers**: the five-layer pattern detector (frequency, outliers,
//!   multi-identity, circular flow, rapid movement)
//! - **spider**: bounded node/edge projection for visualization
//!
//! Every function here is pure: snapshot in, derived view out, no I/O and
//! no shared state, so concurrent requests need no coordination.

pub mod aggregation;
pub mod layers;
pub mod spider;
pub mod suspicion;

/// Thresholds and caps for one analytic call
///
/// Passed explicitly into each computation rather than held as process
/// state, so concurrent requests can run with different tunings (A/B
/// threshold comparison) without interfering.
///
/// # Example
/// ```
/// use fintrace_core_rs::AnalyticsConfig;
///
/// let config = AnalyticsConfig {
///     amount_threshold: 500_000,
///     ..AnalyticsConfig::default()
/// };
/// assert_eq!(config.count_threshold, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
    /// Suspicion classifier: outbound count must strictly exceed this
    pub count_threshold: usize,

    /// Suspicion classifier: outbound amount sum must strictly exceed this
    pub amount_threshold: i64,

    /// Suspicion classifier result cap
    pub suspicious_cap: usize,

    /// L1: outbound count must strictly exceed this
    pub frequency_threshold: usize,

    /// L2: one transaction's amount must strictly exceed this
    pub single_tx_threshold: i64,

    /// L4: maximum cycle length explored by the depth-first search
    pub max_cycle_depth: usize,

    /// L5: inbound-to-outbound window in seconds
    pub rapid_window_secs: i64,

    /// Per-layer result cap
    pub layer_cap: usize,

    /// Spider map: transactions sampled as edges
    pub edge_cap: usize,

    /// Spider map: node cap, independent of edge count
    pub node_cap: usize,

    /// Rows fetched from the source per request
    pub snapshot_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            count_threshold: 10,
            amount_threshold: 100_000,
            suspicious_cap: 50,
            frequency_threshold: 20,
            single_tx_threshold: 50_000,
            max_cycle_depth: 8,
            rapid_window_secs: 24 * 60 * 60,
            layer_cap: 10,
            edge_cap: 100,
            node_cap: 50,
            snapshot_limit: 10_000,
        }
    }
}
