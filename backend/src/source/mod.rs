//! Transaction Source seam
//!
//! The engine never owns storage. It consumes a query capability with the
//! shape `fetch(filter, limit) -> transactions`, owned by the storage
//! layer, and treats everything behind it as opaque. The row limit bounds
//! snapshot size so analytic cost stays proportional to the cap, not the
//! ledger.
//!
//! `MemorySource` is the in-process implementation used by the CLI, the
//! FFI layer, and tests.

use crate::models::transaction::Transaction;
use thiserror::Error;

/// Errors surfaced by a transaction source
///
/// Only `Unavailable` exists: malformed rows are the feed's problem to
/// represent (nullable fields on `Transaction`), and oversized results are
/// truncated, not errors.
#[derive(Debug, Error, PartialEq)]
pub enum SourceError {
    #[error("transaction source unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Snapshot filter
///
/// Both fields optional; `account` matches either endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Restrict to one case
    pub case_id: Option<String>,

    /// Restrict to transfers touching this account
    pub account: Option<String>,
}

impl TransactionFilter {
    /// Check one transaction against the filter
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(case_id) = &self.case_id {
            if tx.case_id() != case_id {
                return false;
            }
        }
        if let Some(account) = &self.account {
            if tx.from_account() != account && tx.to_account() != account {
                return false;
            }
        }
        true
    }
}

/// Query capability owned by the storage layer
///
/// One call produces one immutable snapshot; the engine performs no other
/// I/O. Implementations must apply the filter before the limit so a
/// filtered view is not starved by unrelated rows.
pub trait TransactionSource {
    /// Fetch at most `limit` transactions matching `filter`
    fn fetch(
        &self,
        filter: &TransactionFilter,
        limit: usize,
    ) -> Result<Vec<Transaction>, SourceError>;
}

/// In-memory transaction source
///
/// # Example
/// ```
/// use fintrace_core_rs::{MemorySource, Transaction, TransactionFilter, TransactionSource};
///
/// let source = MemorySource::new(vec![Transaction::new(
///     "CASE_1".to_string(),
///     "A".to_string(),
///     "B".to_string(),
///     Some(100_000),
/// )]);
///
/// let snapshot = source.fetch(&TransactionFilter::default(), 100).unwrap();
/// assert_eq!(snapshot.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    transactions: Vec<Transaction>,
}

impl MemorySource {
    /// Create a source over a fixed transaction list
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Number of rows held
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True when the source holds no rows
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl TransactionSource for MemorySource {
    fn fetch(
        &self,
        filter: &TransactionFilter,
        limit: usize,
    ) -> Result<Vec<Transaction>, SourceError> {
        Ok(self
            .transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .take(limit)
            .cloned()
            .collect())
    }
}
