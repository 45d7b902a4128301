//! PyO3 wrapper for the Analytics Engine
//!
//! This module provides the Python interface the serving layer calls.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{
    layered_to_py, parse_analytics_config, parse_transaction, spider_map_to_py, statistics_to_py,
    suspicious_to_py,
};
use crate::analytics::AnalyticsConfig;
use crate::engine::AnalyticsEngine;
use crate::source::{MemorySource, TransactionFilter};

/// Python wrapper for the Rust analytics engine
///
/// The serving layer loads a ledger snapshot once and queries the four
/// analytic views against it.
///
/// # Example (from Python)
///
/// ```python
/// from fintrace_core_rs import AnalysisEngine
///
/// engine = AnalysisEngine(
///     transactions=[
///         {
///             "case_id": "CASE_001",
///             "from_account": "ACC_A",
///             "to_account": "ACC_B",
///             "amount": 250_000,
///             "timestamp": "2024-03-01T10:30:00Z",
///         },
///     ],
///     config={"amount_threshold": 500_000},
/// )
///
/// stats = engine.statistics()
/// print(f"{stats['total_transactions']} transactions loaded")
/// ```
#[pyclass(name = "AnalysisEngine")]
pub struct PyAnalysisEngine {
    inner: AnalyticsEngine<MemorySource>,
    config: AnalyticsConfig,
}

#[pymethods]
impl PyAnalysisEngine {
    /// Create an engine over a list of transaction dicts
    ///
    /// # Arguments
    ///
    /// * `transactions` - Feed rows; see `parse_transaction` for the schema
    /// * `config` - Optional threshold overrides (missing keys keep defaults)
    ///
    /// # Errors
    ///
    /// Raises ValueError if a row misses a required field or a value does
    /// not convert.
    #[new]
    #[pyo3(signature = (transactions, config=None))]
    fn new(
        transactions: &Bound<'_, PyList>,
        config: Option<&Bound<'_, PyDict>>,
    ) -> PyResult<Self> {
        let mut rows = Vec::with_capacity(transactions.len());
        for py_tx in transactions.iter() {
            let tx_dict: Bound<'_, PyDict> = py_tx.downcast_into()?;
            rows.push(parse_transaction(&tx_dict)?);
        }

        let config = match config {
            Some(py_config) => parse_analytics_config(py_config)?,
            None => AnalyticsConfig::default(),
        };

        Ok(PyAnalysisEngine {
            inner: AnalyticsEngine::new(MemorySource::new(rows)),
            config,
        })
    }

    /// Aggregate statistics
    ///
    /// Returns `{total_transactions, total_cases, total_accounts,
    /// total_amount, avg_amount}`, plus `error` when the source failed.
    #[pyo3(signature = (case_id=None, account=None))]
    fn statistics(
        &self,
        py: Python,
        case_id: Option<String>,
        account: Option<String>,
    ) -> PyResult<Py<PyDict>> {
        let filter = TransactionFilter { case_id, account };
        statistics_to_py(py, &self.inner.statistics(&filter, &self.config))
    }

    /// Ranked suspicious accounts
    ///
    /// Returns a list of `{account, total_transactions, total_amount}`,
    /// amount descending; empty on source failure.
    #[pyo3(signature = (case_id=None, account=None))]
    fn suspicious(
        &self,
        py: Python,
        case_id: Option<String>,
        account: Option<String>,
    ) -> PyResult<Py<PyList>> {
        let filter = TransactionFilter { case_id, account };
        suspicious_to_py(py, &self.inner.suspicious(&filter, &self.config))
    }

    /// Five-layer pattern classification
    ///
    /// Returns `{layer1_high_frequency, layer2_large_amounts,
    /// layer3_multi_identity, layer4_circular, layer5_rapid_movement}`.
    #[pyo3(signature = (case_id=None, account=None))]
    fn layered_analysis(
        &self,
        py: Python,
        case_id: Option<String>,
        account: Option<String>,
    ) -> PyResult<Py<PyDict>> {
        let filter = TransactionFilter { case_id, account };
        layered_to_py(py, &self.inner.layered_analysis(&filter, &self.config))
    }

    /// Network visualization payload
    ///
    /// Returns `{nodes: [{data: {id, classification}}], edges:
    /// [{data: {source, target, weight}}]}`.
    #[pyo3(signature = (case_id=None, account=None))]
    fn spider_map(
        &self,
        py: Python,
        case_id: Option<String>,
        account: Option<String>,
    ) -> PyResult<Py<PyDict>> {
        let filter = TransactionFilter { case_id, account };
        spider_map_to_py(py, &self.inner.spider_map(&filter, &self.config))
    }

    /// Number of rows loaded
    fn transaction_count(&self) -> usize {
        self.inner.source().len()
    }
}
