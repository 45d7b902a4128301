//! FinTrace Core - Rust Engine
//!
//! Transaction graph analytics engine for anti-money-laundering review.
//! Turns a flat transaction snapshot into account aggregates, suspicion
//! flags, a five-layer pattern classification, and a bounded network
//! visualization payload.
//!
//! # Architecture
//!
//! - **models**: Domain types (Transaction, AccountAggregate, SuspicionFlag)
//! - **source**: Transaction feed seam (query capability owned by storage)
//! - **analytics**: Aggregation, classification, layered detection, graph projection
//! - **engine**: Per-request orchestration of the four analytic views
//! - **ffi**: PyO3 boundary for the Python serving layer
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (minor units)
//! 2. Every analytic view is a pure function of one immutable snapshot
//! 3. Analytic entry points never fail: malformed records are coerced or
//!    skipped, source outages degrade to zeroed payloads with a diagnostic

// Module declarations
pub mod analytics;
pub mod engine;
pub mod models;
pub mod source;

// Re-exports for convenience
pub use analytics::{
    aggregation::{aggregate_accounts, ledger_totals},
    layers::{detect_layers, ConduitFlag, CycleFlag, LayeredAnalysis},
    spider::{build_graph_view, GraphView},
    suspicion::classify_accounts,
    AnalyticsConfig,
};
pub use engine::{
    AnalyticsEngine, LayeredReport, SpiderMapReport, StatisticsReport, SuspiciousAccount,
    SuspiciousReport,
};
pub use models::{
    aggregate::{AccountAggregate, LedgerTotals, SuspicionFlag, SuspicionReason},
    transaction::{Transaction, UNKNOWN_ACCOUNT},
};
pub use source::{MemorySource, SourceError, TransactionFilter, TransactionSource};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn fintrace_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::engine::PyAnalysisEngine>()?;
    Ok(())
}
