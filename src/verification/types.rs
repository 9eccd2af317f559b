use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BatchRecord, ExpiryState, Verdict};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Recoverable verification failures. Expired or unverified batches are
/// verdicts, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("No batch number supplied")]
    EmptyQuery,

    #[error("Batch not found in system: {batch_no}")]
    NotFound { batch_no: String },

    #[error("Invalid date in {field}: {value}")]
    InvalidDate { field: String, value: String },
}

impl VerificationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "EMPTY_QUERY",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidDate { .. } => "INVALID_DATE",
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Which collections contributed to a merged record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOrigin {
    PharmacyOnly,
    ManufacturerOnly,
    Both,
}

/// Where the batch currently sits in the supply chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Custody {
    /// Only the manufacturer knows this batch.
    NotYetAccepted,
    /// A pharmacy holds the batch; the name may be missing from its record.
    Pharmacy { name: Option<String> },
}

pub const NOT_YET_ACCEPTED_LABEL: &str = "Not yet accepted by pharmacy";
pub const UNKNOWN_PHARMACY_LABEL: &str = "Unknown pharmacy";

impl Custody {
    pub fn display(&self) -> &str {
        match self {
            Self::NotYetAccepted => NOT_YET_ACCEPTED_LABEL,
            Self::Pharmacy { name: Some(name) } => name,
            Self::Pharmacy { name: None } => UNKNOWN_PHARMACY_LABEL,
        }
    }
}

/// The single authoritative record for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub record: BatchRecord,
    pub origin: MergeOrigin,
    pub custody: Custody,
    /// Fields the pharmacy record lacked and the manufacturer record supplied.
    pub backfilled: Vec<String>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Day-granularity expiry facts relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryStatus {
    pub expiry_day: NaiveDate,
    pub is_expired: bool,
    pub expires_today: bool,
    /// Still usable, but within the near-expiry window.
    pub near_expiry: bool,
    /// Negative once expired: days since expiry.
    pub days_remaining: i64,
}

impl ExpiryStatus {
    pub fn state(&self) -> ExpiryState {
        if self.expires_today {
            ExpiryState::ExpiresToday
        } else if self.is_expired {
            ExpiryState::Expired
        } else if self.near_expiry {
            ExpiryState::NearExpiry
        } else {
            ExpiryState::Active
        }
    }
}

/// What the authenticity classifier is allowed to see: either nothing was
/// found, or a record together with its expiry facts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    NotFound,
    Found {
        merged: &'a MergedRecord,
        expiry: &'a ExpiryStatus,
    },
}

impl<'a> Resolution<'a> {
    /// Pair a lookup with its expiry facts. A record without expiry facts
    /// (or facts without a record) is not a resolution.
    pub fn from_parts(
        merged: Option<&'a MergedRecord>,
        expiry: Option<&'a ExpiryStatus>,
    ) -> Option<Self> {
        match (merged, expiry) {
            (None, None) => Some(Self::NotFound),
            (Some(merged), Some(expiry)) => Some(Self::Found { merged, expiry }),
            _ => None,
        }
    }

    pub fn merged(&self) -> Option<&'a MergedRecord> {
        match *self {
            Self::NotFound => None,
            Self::Found { merged, .. } => Some(merged),
        }
    }

    pub fn expiry(&self) -> Option<&'a ExpiryStatus> {
        match *self {
            Self::NotFound => None,
            Self::Found { expiry, .. } => Some(expiry),
        }
    }
}

/// The four booleans the authenticity precedence is decided on, plus
/// whether any record was found at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthenticitySignals {
    pub found: bool,
    pub is_expired: bool,
    pub expires_today: bool,
    pub blockchain_verified: bool,
    pub accepted_from_manufacturer: bool,
}

impl From<Resolution<'_>> for AuthenticitySignals {
    fn from(resolution: Resolution<'_>) -> Self {
        match resolution {
            Resolution::NotFound => Self::default(),
            Resolution::Found { merged, expiry } => Self {
                found: true,
                is_expired: expiry.is_expired,
                expires_today: expiry.expires_today,
                blockchain_verified: merged.record.blockchain_verified == Some(true),
                accepted_from_manufacturer: merged.record.accepted_from_manufacturer == Some(true),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Flat result handed to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub exists: bool,
    pub authentic: bool,
    pub message: String,
    pub batch_no: String,
    pub name: Option<String>,
    pub formulation: Option<String>,
    pub expiry: Option<NaiveDate>,
    pub manufacturer: Option<String>,
    pub pharmacy: Option<String>,
    pub quantity: Option<u64>,
    pub status: String,
    pub is_expired: bool,
    pub days_remaining: Option<i64>,
    pub expires_today: bool,
    pub near_expiry: bool,
    /// `None` when the batch was not found.
    pub expiry_status: Option<ExpiryState>,
}

/// Everything one verification produced.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationOutcome {
    pub verdict: Verdict,
    pub result: VerificationResult,
    pub merged: Option<MergedRecord>,
    pub expiry: Option<ExpiryStatus>,
    /// Instant of this check; stamps the `current_verification` timeline event.
    pub checked_at: DateTime<Utc>,
}

impl VerificationOutcome {
    /// Provenance timeline for this outcome; `None` when the batch was not found.
    pub fn timeline(&self) -> Option<crate::timeline::Timeline<'_>> {
        self.merged
            .as_ref()
            .map(|merged| crate::timeline::build_timeline(merged, self.verdict, self.checked_at))
    }
}
