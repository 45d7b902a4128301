//! Aggregation Engine
//!
//! Folds a transaction snapshot into per-account rollups and scalar
//! totals. Pure and total: null and negative amounts count as 0, rows
//! with sentinel endpoints still aggregate, and an empty snapshot yields
//! zeroed output rather than an error.

use crate::models::aggregate::{AccountAggregate, LedgerTotals};
use crate::models::transaction::Transaction;
use std::collections::{BTreeMap, BTreeSet};

/// Build the per-account aggregate map for one snapshot
///
/// Every account appearing as sender or receiver gets an entry. BTreeMap
/// keys give deterministic iteration for downstream ordering.
///
/// # Example
/// ```
/// use fintrace_core_rs::{aggregate_accounts, Transaction};
///
/// let snapshot = vec![Transaction::new(
///     "CASE_1".to_string(),
///     "A".to_string(),
///     "B".to_string(),
///     Some(100_000),
/// )];
///
/// let aggregates = aggregate_accounts(&snapshot);
/// assert_eq!(aggregates["A"].amount_out, 100_000);
/// assert_eq!(aggregates["B"].amount_in, 100_000);
/// ```
pub fn aggregate_accounts(snapshot: &[Transaction]) -> BTreeMap<String, AccountAggregate> {
    let mut aggregates: BTreeMap<String, AccountAggregate> = BTreeMap::new();

    for tx in snapshot {
        let amount = tx.amount_or_zero();

        let out = aggregates.entry(tx.from_account().to_string()).or_default();
        out.tx_count_out += 1;
        out.amount_out += amount;
        out.counterparties.insert(tx.to_account().to_string());

        let inc = aggregates.entry(tx.to_account().to_string()).or_default();
        inc.tx_count_in += 1;
        inc.amount_in += amount;
        inc.counterparties.insert(tx.from_account().to_string());
    }

    aggregates
}

/// Compute scalar totals for one snapshot
///
/// `total_amount` sums non-null amounts; `avg_amount` divides by the
/// count of non-null amounts, 0.0 when there are none. `total_accounts`
/// is the size of the union of both endpoint sets (the UNKNOWN sentinel
/// counts here; only graph construction excludes it).
pub fn ledger_totals(snapshot: &[Transaction]) -> LedgerTotals {
    let mut cases: BTreeSet<&str> = BTreeSet::new();
    let mut accounts: BTreeSet<&str> = BTreeSet::new();
    let mut total_amount: i64 = 0;
    let mut priced_rows: usize = 0;

    for tx in snapshot {
        cases.insert(tx.case_id());
        accounts.insert(tx.from_account());
        accounts.insert(tx.to_account());

        if tx.amount().is_some() {
            total_amount += tx.amount_or_zero();
            priced_rows += 1;
        }
    }

    let avg_amount = if priced_rows == 0 {
        0.0
    } else {
        total_amount as f64 / priced_rows as f64
    };

    LedgerTotals {
        total_transactions: snapshot.len(),
        total_cases: cases.len(),
        total_accounts: accounts.len(),
        total_amount,
        avg_amount,
    }
}
