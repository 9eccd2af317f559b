use serde::{Deserialize, Serialize};

use super::enums::RecordSource;

/// A date as it arrives from a collaborator: ISO text, RFC 3339 timestamp or
/// epoch milliseconds. Anything else is kept verbatim so it can be reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateLike {
    EpochMillis(i64),
    Text(String),
    Other(serde_json::Value),
}

impl std::fmt::Display for DateLike {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EpochMillis(ms) => write!(f, "{ms}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for DateLike {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Batch record exactly as a collaborator serves it.
///
/// Both `/batches` and `/pharmacy/medicines` share this shape; field names
/// differ between the two (`expiry` vs `expiryDate`, `pharmacy` vs
/// `pharmacyName`), so every alias is captured separately here and
/// collapsed by `verification::normalize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBatchRecord {
    pub batch_no: Option<String>,
    pub name: Option<String>,
    pub formulation: Option<String>,
    pub manufacturer: Option<String>,
    pub expiry: Option<DateLike>,
    pub expiry_date: Option<DateLike>,
    /// Number or numeric string; validated during normalization.
    pub quantity: Option<serde_json::Value>,
    pub blockchain_verified: Option<bool>,
    pub blockchain_transaction_hash: Option<String>,
    pub manufacture_date: Option<DateLike>,
    pub created_at: Option<DateLike>,
    pub pharmacy: Option<String>,
    pub pharmacy_name: Option<String>,
    pub accepted_from_manufacturer: Option<bool>,
    pub acceptance_date: Option<DateLike>,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateLike>,
}

/// Canonical batch record. One shape regardless of source; absent fields
/// stay `None` so the resolver can backfill them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecord {
    pub source: RecordSource,
    pub batch_no: String,
    pub name: Option<String>,
    pub formulation: Option<String>,
    pub manufacturer: Option<String>,
    pub expiry: Option<DateLike>,
    pub quantity: Option<u64>,
    pub blockchain_verified: Option<bool>,
    pub blockchain_transaction_hash: Option<String>,
    pub manufacture_date: Option<DateLike>,
    pub created_at: Option<DateLike>,
    pub pharmacy: Option<String>,
    pub accepted_from_manufacturer: Option<bool>,
    pub acceptance_date: Option<DateLike>,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateLike>,
}

impl BatchRecord {
    /// Empty record for `batch_no`; every optional field absent.
    pub fn new(source: RecordSource, batch_no: impl Into<String>) -> Self {
        Self {
            source,
            batch_no: batch_no.into(),
            name: None,
            formulation: None,
            manufacturer: None,
            expiry: None,
            quantity: None,
            blockchain_verified: None,
            blockchain_transaction_hash: None,
            manufacture_date: None,
            created_at: None,
            pharmacy: None,
            accepted_from_manufacturer: None,
            acceptance_date: None,
            verified_by: None,
            verified_at: None,
        }
    }

    /// Case-insensitive batch number match.
    pub fn matches(&self, query: &str) -> bool {
        self.batch_no.to_lowercase() == query.to_lowercase()
    }
}
