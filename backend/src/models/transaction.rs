//! Transaction model
//!
//! Represents a single transfer row from the ledger feed.
//! Each transaction has:
//! - Case identifier (investigation the row was imported under)
//! - Originating and receiving account ids
//! - Amount (i64 minor units) - nullable on the feed
//! - Timestamp - nullable on the feed
//! - Optional currency code and declared owner identity
//!
//! Transactions are immutable once read; the engine never writes them back.
//!
//! CRITICAL: All money values are i64 (minor units)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel account id used by the feed when an endpoint could not be
/// resolved. Excluded from graph construction, but still counted in
/// aggregate statistics.
pub const UNKNOWN_ACCOUNT: &str = "UNKNOWN";

/// Represents one transfer between two accounts
///
/// # Example
/// ```
/// use fintrace_core_rs::Transaction;
///
/// let tx = Transaction::new(
///     "CASE_001".to_string(),
///     "ACC_A".to_string(),
///     "ACC_B".to_string(),
///     Some(250_000), // $2,500.00 in minor units
/// );
/// assert_eq!(tx.amount_or_zero(), 250_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier (UUID when synthesized)
    id: String,

    /// Case the row was imported under
    case_id: String,

    /// Originating account id (may be the UNKNOWN sentinel)
    from_account: String,

    /// Receiving account id (may be the UNKNOWN sentinel)
    to_account: String,

    /// Transfer amount in minor units; None when the feed row had no
    /// parseable amount
    #[serde(default)]
    amount: Option<i64>,

    /// Transfer timestamp; None when the feed row had none
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,

    /// ISO currency code, when the feed carries one
    #[serde(default)]
    currency: Option<String>,

    /// Declared owner identity key backing multi-identity detection.
    /// Feeds without this attribute degrade that layer to empty.
    #[serde(default)]
    owner_id: Option<String>,
}

impl Transaction {
    /// Create a new transaction with a synthesized UUID id
    ///
    /// # Arguments
    /// * `case_id` - Case the row belongs to
    /// * `from_account` - Originating account id
    /// * `to_account` - Receiving account id
    /// * `amount` - Amount in minor units, None if absent
    ///
    /// # Example
    /// ```
    /// use fintrace_core_rs::Transaction;
    ///
    /// let tx = Transaction::new(
    ///     "CASE_001".to_string(),
    ///     "ACC_A".to_string(),
    ///     "ACC_B".to_string(),
    ///     Some(100_000),
    /// );
    /// assert_eq!(tx.from_account(), "ACC_A");
    /// ```
    pub fn new(
        case_id: String,
        from_account: String,
        to_account: String,
        amount: Option<i64>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            case_id,
            from_account,
            to_account,
            amount,
            timestamp: None,
            currency: None,
            owner_id: None,
        }
    }

    /// Restore a transaction from a feed record with all fields preserved,
    /// including the id. Used when the storage layer already assigned one.
    pub fn from_record(
        id: String,
        case_id: String,
        from_account: String,
        to_account: String,
        amount: Option<i64>,
        timestamp: Option<DateTime<Utc>>,
        currency: Option<String>,
        owner_id: Option<String>,
    ) -> Self {
        Self {
            id,
            case_id,
            from_account,
            to_account,
            amount,
            timestamp,
            currency,
            owner_id,
        }
    }

    /// Set timestamp (builder pattern)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set currency code (builder pattern)
    pub fn with_currency(mut self, currency: String) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Set declared owner identity (builder pattern)
    pub fn with_owner(mut self, owner_id: String) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Get transaction ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get case ID
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    /// Get originating account id
    pub fn from_account(&self) -> &str {
        &self.from_account
    }

    /// Get receiving account id
    pub fn to_account(&self) -> &str {
        &self.to_account
    }

    /// Get raw amount (None when the feed had no parseable value)
    pub fn amount(&self) -> Option<i64> {
        self.amount
    }

    /// Amount coerced for aggregation: null and negative amounts count as 0.
    /// Malformed rows must never fail an aggregate.
    pub fn amount_or_zero(&self) -> i64 {
        self.amount.unwrap_or(0).max(0)
    }

    /// Get timestamp
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Get currency code
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Get declared owner identity key
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    /// Check that neither endpoint is the UNKNOWN sentinel.
    ///
    /// Graph construction (circular-flow detection and the spider map)
    /// only admits transfers with two resolved endpoints.
    pub fn has_known_endpoints(&self) -> bool {
        self.from_account != UNKNOWN_ACCOUNT && self.to_account != UNKNOWN_ACCOUNT
    }
}
