//! Derived account-level types
//!
//! Rollups computed fresh from each snapshot. Nothing in this module is
//! persisted or incrementally updated; invalidation is implicit because
//! every analytic call recomputes from its own fetch.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-account rollup for the current snapshot
///
/// Keyed by account id in the aggregation map. Counterparties use a
/// BTreeSet so iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAggregate {
    /// Number of outbound transfers
    pub tx_count_out: usize,

    /// Number of inbound transfers
    pub tx_count_in: usize,

    /// Sum of outbound amounts (minor units, nulls coerced to 0)
    pub amount_out: i64,

    /// Sum of inbound amounts (minor units, nulls coerced to 0)
    pub amount_in: i64,

    /// Distinct accounts this account exchanged funds with
    pub counterparties: BTreeSet<String>,
}

/// Scalar totals over one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Number of transactions in the snapshot
    pub total_transactions: usize,

    /// Distinct case ids
    pub total_cases: usize,

    /// Size of the union of originating and receiving account sets
    pub total_accounts: usize,

    /// Sum of non-null amounts (minor units)
    pub total_amount: i64,

    /// Mean of non-null amounts; 0.0 when no amount was present
    pub avg_amount: f64,
}

/// Why an account was flagged by the suspicion classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuspicionReason {
    /// Outbound transfer count exceeded the configured threshold
    HighCount,

    /// Outbound amount sum exceeded the configured threshold
    HighAmount,
}

/// Threshold-based classification result for one account
///
/// Both reasons may be set when both thresholds were crossed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspicionFlag {
    /// Flagged account id
    pub account: String,

    /// Triggering reason codes
    pub reasons: BTreeSet<SuspicionReason>,

    /// Outbound amount sum that was evaluated (minor units)
    pub total_amount: i64,

    /// Outbound transfer count that was evaluated
    pub total_count: usize,
}
