//! Suspicion Classifier
//!
//! Applies the two configured thresholds to per-account aggregates.
//! Pure function of the aggregate map and the config; ordering is total
//! (amount descending, account id ascending on ties) so pagination and
//! tests are stable.

use crate::analytics::AnalyticsConfig;
use crate::models::aggregate::{AccountAggregate, SuspicionFlag, SuspicionReason};
use std::collections::{BTreeMap, BTreeSet};

/// Flag accounts whose outbound activity crosses either threshold
///
/// An account is flagged iff `tx_count_out > count_threshold` OR
/// `amount_out > amount_threshold` - both strict, so an account sitting
/// exactly at a threshold is not flagged. Both reason codes are set when
/// both thresholds were crossed. The result is truncated to
/// `suspicious_cap` after ordering.
///
/// # Example
/// ```
/// use fintrace_core_rs::{aggregate_accounts, classify_accounts, AnalyticsConfig, Transaction};
///
/// let snapshot = vec![Transaction::new(
///     "CASE_1".to_string(),
///     "A".to_string(),
///     "B".to_string(),
///     Some(200_000),
/// )];
///
/// let flags = classify_accounts(&aggregate_accounts(&snapshot), &AnalyticsConfig::default());
/// assert_eq!(flags.len(), 1);
/// assert_eq!(flags[0].account, "A");
/// ```
pub fn classify_accounts(
    aggregates: &BTreeMap<String, AccountAggregate>,
    config: &AnalyticsConfig,
) -> Vec<SuspicionFlag> {
    let mut flags: Vec<SuspicionFlag> = Vec::new();

    for (account, aggregate) in aggregates {
        let mut reasons: BTreeSet<SuspicionReason> = BTreeSet::new();

        if aggregate.tx_count_out > config.count_threshold {
            reasons.insert(SuspicionReason::HighCount);
        }
        if aggregate.amount_out > config.amount_threshold {
            reasons.insert(SuspicionReason::HighAmount);
        }

        if !reasons.is_empty() {
            flags.push(SuspicionFlag {
                account: account.clone(),
                reasons,
                total_amount: aggregate.amount_out,
                total_count: aggregate.tx_count_out,
            });
        }
    }

    // Amount descending, account id ascending on ties
    flags.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.account.cmp(&b.account))
    });
    flags.truncate(config.suspicious_cap);
    flags
}
