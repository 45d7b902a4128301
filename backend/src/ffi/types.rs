//! Type conversion utilities for the FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use chrono::{DateTime, Utc};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::analytics::AnalyticsConfig;
use crate::engine::{LayeredReport, SpiderMapReport, StatisticsReport, SuspiciousReport};
use crate::models::transaction::Transaction;

// ========================================================================
// PyDict Extraction Helpers (DRY Pattern)
// ========================================================================

/// Extract a required field from a Python dict with a clear error message.
///
/// # Errors
/// Returns PyValueError if the field is missing or the type conversion
/// fails.
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Missing required field '{}'",
                key
            ))
        })?
        .extract()
}

/// Extract an optional field from a Python dict.
///
/// Missing keys and explicit `None` values both map to `None`; only a
/// failed type conversion is an error.
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Extract a field with a default value if missing.
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => value.extract(),
        _ => Ok(default),
    }
}

// ========================================================================
// Input Parsers
// ========================================================================

/// Convert a Python dict to an AnalyticsConfig
///
/// Every field is optional and falls back to the documented default, so
/// the serving layer can override a single threshold without restating
/// the rest.
pub fn parse_analytics_config(py_config: &Bound<'_, PyDict>) -> PyResult<AnalyticsConfig> {
    let defaults = AnalyticsConfig::default();

    Ok(AnalyticsConfig {
        count_threshold: extract_with_default(py_config, "count_threshold", defaults.count_threshold)?,
        amount_threshold: extract_with_default(py_config, "amount_threshold", defaults.amount_threshold)?,
        suspicious_cap: extract_with_default(py_config, "suspicious_cap", defaults.suspicious_cap)?,
        frequency_threshold: extract_with_default(
            py_config,
            "frequency_threshold",
            defaults.frequency_threshold,
        )?,
        single_tx_threshold: extract_with_default(
            py_config,
            "single_tx_threshold",
            defaults.single_tx_threshold,
        )?,
        max_cycle_depth: extract_with_default(py_config, "max_cycle_depth", defaults.max_cycle_depth)?,
        rapid_window_secs: extract_with_default(
            py_config,
            "rapid_window_secs",
            defaults.rapid_window_secs,
        )?,
        layer_cap: extract_with_default(py_config, "layer_cap", defaults.layer_cap)?,
        edge_cap: extract_with_default(py_config, "edge_cap", defaults.edge_cap)?,
        node_cap: extract_with_default(py_config, "node_cap", defaults.node_cap)?,
        snapshot_limit: extract_with_default(py_config, "snapshot_limit", defaults.snapshot_limit)?,
    })
}

/// Convert a Python dict to a Transaction
///
/// Required: `case_id`, `from_account`, `to_account`. Optional: `id`
/// (synthesized when absent), `amount` (minor units), `timestamp`
/// (RFC 3339 string), `currency`, `owner_id`.
///
/// # Errors
/// Raises ValueError when a required field is missing or the timestamp
/// does not parse.
pub fn parse_transaction(py_tx: &Bound<'_, PyDict>) -> PyResult<Transaction> {
    let case_id: String = extract_required(py_tx, "case_id")?;
    let from_account: String = extract_required(py_tx, "from_account")?;
    let to_account: String = extract_required(py_tx, "to_account")?;

    let amount: Option<i64> = extract_optional(py_tx, "amount")?;

    let timestamp: Option<DateTime<Utc>> = match extract_optional::<String>(py_tx, "timestamp")? {
        Some(raw) => Some(
            DateTime::parse_from_rfc3339(&raw)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|e| {
                    PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                        "Invalid timestamp '{}': {}",
                        raw, e
                    ))
                })?,
        ),
        None => None,
    };

    let currency: Option<String> = extract_optional(py_tx, "currency")?;
    let owner_id: Option<String> = extract_optional(py_tx, "owner_id")?;

    let tx = match extract_optional::<String>(py_tx, "id")? {
        Some(id) => Transaction::from_record(
            id,
            case_id,
            from_account,
            to_account,
            amount,
            timestamp,
            currency,
            owner_id,
        ),
        None => {
            let mut tx = Transaction::new(case_id, from_account, to_account, amount);
            if let Some(ts) = timestamp {
                tx = tx.with_timestamp(ts);
            }
            if let Some(currency) = currency {
                tx = tx.with_currency(currency);
            }
            if let Some(owner) = owner_id {
                tx = tx.with_owner(owner);
            }
            tx
        }
    };

    Ok(tx)
}

// ========================================================================
// Report Converters
// ========================================================================

/// Convert a StatisticsReport to a Python dict
pub fn statistics_to_py(py: Python, report: &StatisticsReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("total_transactions", report.total_transactions)?;
    dict.set_item("total_cases", report.total_cases)?;
    dict.set_item("total_accounts", report.total_accounts)?;
    dict.set_item("total_amount", report.total_amount)?;
    dict.set_item("avg_amount", report.avg_amount)?;
    if let Some(error) = &report.error {
        dict.set_item("error", error)?;
    }

    Ok(dict.into())
}

/// Convert a SuspiciousReport to a Python list of dicts
///
/// The endpoint payload is a bare array; a source outage yields an empty
/// list, matching the serving layer's contract.
pub fn suspicious_to_py(py: Python, report: &SuspiciousReport) -> PyResult<Py<PyList>> {
    let list = PyList::empty(py);

    for account in &report.accounts {
        let dict = PyDict::new(py);
        dict.set_item("account", &account.account)?;
        dict.set_item("total_transactions", account.total_transactions)?;
        dict.set_item("total_amount", account.total_amount)?;
        list.append(dict)?;
    }

    Ok(list.into())
}

/// Convert a LayeredReport to a Python dict
pub fn layered_to_py(py: Python, report: &LayeredReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("layer1_high_frequency", report.layer1_high_frequency.clone())?;
    dict.set_item("layer2_large_amounts", report.layer2_large_amounts.clone())?;
    dict.set_item("layer3_multi_identity", report.layer3_multi_identity.clone())?;

    let cycles = PyList::empty(py);
    for cycle in &report.layer4_circular {
        let cycle_dict = PyDict::new(py);
        cycle_dict.set_item("accounts", cycle.accounts.clone())?;
        cycle_dict.set_item("total_value", cycle.total_value)?;
        cycles.append(cycle_dict)?;
    }
    dict.set_item("layer4_circular", cycles)?;

    let conduits = PyList::empty(py);
    for conduit in &report.layer5_rapid_movement {
        let conduit_dict = PyDict::new(py);
        conduit_dict.set_item("account", &conduit.account)?;
        conduit_dict.set_item("source", &conduit.source)?;
        conduit_dict.set_item("destination", &conduit.destination)?;
        conduit_dict.set_item("amount_in", conduit.amount_in)?;
        conduit_dict.set_item("amount_out", conduit.amount_out)?;
        conduit_dict.set_item("elapsed_secs", conduit.elapsed_secs)?;
        conduits.append(conduit_dict)?;
    }
    dict.set_item("layer5_rapid_movement", conduits)?;

    if let Some(error) = &report.error {
        dict.set_item("error", error)?;
    }

    Ok(dict.into())
}

/// Convert a SpiderMapReport to a Python dict
pub fn spider_map_to_py(py: Python, report: &SpiderMapReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    let nodes = PyList::empty(py);
    for node in &report.nodes {
        let data = PyDict::new(py);
        data.set_item("id", &node.data.id)?;
        data.set_item("classification", &node.data.classification)?;

        let wrapper = PyDict::new(py);
        wrapper.set_item("data", data)?;
        nodes.append(wrapper)?;
    }
    dict.set_item("nodes", nodes)?;

    let edges = PyList::empty(py);
    for edge in &report.edges {
        let data = PyDict::new(py);
        data.set_item("source", &edge.data.source)?;
        data.set_item("target", &edge.data.target)?;
        data.set_item("weight", edge.data.weight)?;

        let wrapper = PyDict::new(py);
        wrapper.set_item("data", data)?;
        edges.append(wrapper)?;
    }
    dict.set_item("edges", edges)?;

    if let Some(error) = &report.error {
        dict.set_item("error", error)?;
    }

    Ok(dict.into())
}
