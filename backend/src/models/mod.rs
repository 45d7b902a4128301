//! Domain models
//!
//! Data types shared by every analytic component:
//! - Transaction: one immutable ledger row from the feed
//! - AccountAggregate: per-account rollup for the current snapshot
//! - SuspicionFlag: threshold-based classification result

pub mod aggregate;
pub mod transaction;

pub use aggregate::{AccountAggregate, LedgerTotals, SuspicionFlag, SuspicionReason};
pub use transaction::{Transaction, UNKNOWN_ACCOUNT};
