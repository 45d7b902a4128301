//! Analytics Engine
//!
//! Per-request orchestration of the four analytic views. The engine owns
//! nothing but the transaction source seam; every operation fetches one
//! snapshot, computes from it, and returns a typed report.
//!
//! # Degrade, never fail
//!
//! The serving layer must always be able to answer with a well-formed
//! payload, so a source outage produces a zeroed/empty report carrying
//! the diagnostic in `error` - no operation here returns `Err` or panics.
//! Malformed records never surface at all; they are coerced or skipped
//! inside the analytics.
//!
//! # Example
//!
//! ```rust
//! use fintrace_core_rs::{
//!     AnalyticsConfig, AnalyticsEngine, MemorySource, Transaction, TransactionFilter,
//! };
//!
//! let source = MemorySource::new(vec![Transaction::new(
//!     "CASE_1".to_string(),
//!     "ACC_A".to_string(),
//!     "ACC_B".to_string(),
//!     Some(250_000),
//! )]);
//!
//! let engine = AnalyticsEngine::new(source);
//! let report = engine.statistics(&TransactionFilter::default(), &AnalyticsConfig::default());
//! assert_eq!(report.total_transactions, 1);
//! assert!(report.error.is_none());
//! ```

use crate::analytics::layers::{detect_layers, ConduitFlag, CycleFlag};
use crate::analytics::spider::{build_graph_view, SpiderEdge, SpiderNode};
use crate::analytics::suspicion::classify_accounts;
use crate::analytics::{aggregation, AnalyticsConfig};
use crate::models::transaction::Transaction;
use crate::source::{SourceError, TransactionFilter, TransactionSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

// ============================================================================
// Report Types (serialized at the boundary only)
// ============================================================================

/// `/api/statistics` payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub total_transactions: usize,
    pub total_cases: usize,
    pub total_accounts: usize,
    pub total_amount: i64,
    pub avg_amount: f64,

    /// Set only when the source was unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One row of the suspicious-accounts ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspiciousAccount {
    pub account: String,
    pub total_transactions: usize,
    pub total_amount: i64,
}

/// Suspicious-accounts result
///
/// The transport payload for `/api/suspicious` is the bare `accounts`
/// array; the `error` field exists for callers, since an array cannot
/// carry a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousReport {
    pub accounts: Vec<SuspiciousAccount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `/api/layered-analysis` payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayeredReport {
    pub layer1_high_frequency: Vec<String>,
    pub layer2_large_amounts: Vec<String>,
    pub layer3_multi_identity: Vec<String>,
    pub layer4_circular: Vec<CycleFlag>,
    pub layer5_rapid_movement: Vec<ConduitFlag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `/api/spider-map` payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpiderMapReport {
    pub nodes: Vec<SpiderNode>,
    pub edges: Vec<SpiderEdge>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Engine
// ============================================================================

/// Request-scoped analytics over a transaction source
///
/// Holds only the source; thresholds arrive with each call so concurrent
/// requests can run different tunings. All methods take `&self` - the
/// engine shares freely across threads when the source does.
pub struct AnalyticsEngine<S> {
    source: S,
}

impl<S: TransactionSource> AnalyticsEngine<S> {
    /// Create an engine over a transaction source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Borrow the underlying source
    pub fn source(&self) -> &S {
        &self.source
    }

    fn snapshot(
        &self,
        filter: &TransactionFilter,
        config: &AnalyticsConfig,
    ) -> Result<Vec<Transaction>, SourceError> {
        let snapshot = self.source.fetch(filter, config.snapshot_limit)?;
        debug!(rows = snapshot.len(), "fetched transaction snapshot");
        Ok(snapshot)
    }

    /// Aggregate statistics for the current snapshot
    pub fn statistics(
        &self,
        filter: &TransactionFilter,
        config: &AnalyticsConfig,
    ) -> StatisticsReport {
        match self.snapshot(filter, config) {
            Ok(snapshot) => {
                let totals = aggregation::ledger_totals(&snapshot);
                StatisticsReport {
                    total_transactions: totals.total_transactions,
                    total_cases: totals.total_cases,
                    total_accounts: totals.total_accounts,
                    total_amount: totals.total_amount,
                    avg_amount: totals.avg_amount,
                    error: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "statistics degraded to zeroed payload");
                StatisticsReport {
                    error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        }
    }

    /// Ranked suspicious accounts for the current snapshot
    pub fn suspicious(
        &self,
        filter: &TransactionFilter,
        config: &AnalyticsConfig,
    ) -> SuspiciousReport {
        match self.snapshot(filter, config) {
            Ok(snapshot) => {
                let aggregates = aggregation::aggregate_accounts(&snapshot);
                let accounts = classify_accounts(&aggregates, config)
                    .into_iter()
                    .map(|flag| SuspiciousAccount {
                        account: flag.account,
                        total_transactions: flag.total_count,
                        total_amount: flag.total_amount,
                    })
                    .collect();
                SuspiciousReport { accounts, error: None }
            }
            Err(e) => {
                warn!(error = %e, "suspicious ranking degraded to empty payload");
                SuspiciousReport {
                    accounts: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Five-layer pattern classification for the current snapshot
    pub fn layered_analysis(
        &self,
        filter: &TransactionFilter,
        config: &AnalyticsConfig,
    ) -> LayeredReport {
        match self.snapshot(filter, config) {
            Ok(snapshot) => {
                let layers = detect_layers(&snapshot, config);
                LayeredReport {
                    layer1_high_frequency: layers.layer1_high_frequency,
                    layer2_large_amounts: layers.layer2_large_amounts,
                    layer3_multi_identity: layers.layer3_multi_identity,
                    layer4_circular: layers.layer4_circular,
                    layer5_rapid_movement: layers.layer5_rapid_movement,
                    error: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "layered analysis degraded to empty payload");
                LayeredReport {
                    error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        }
    }

    /// Bounded network visualization payload for the current snapshot
    ///
    /// Consults the suspicion classifier on the same snapshot to color
    /// nodes; one fetch serves both.
    pub fn spider_map(
        &self,
        filter: &TransactionFilter,
        config: &AnalyticsConfig,
    ) -> SpiderMapReport {
        match self.snapshot(filter, config) {
            Ok(snapshot) => {
                let aggregates = aggregation::aggregate_accounts(&snapshot);
                let flagged: BTreeSet<String> = classify_accounts(&aggregates, config)
                    .into_iter()
                    .map(|flag| flag.account)
                    .collect();

                let view = build_graph_view(&snapshot, &flagged, config);
                SpiderMapReport {
                    nodes: view.nodes,
                    edges: view.edges,
                    error: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "spider map degraded to empty payload");
                SpiderMapReport {
                    error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        }
    }
}
