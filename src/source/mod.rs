//! Record collaborators: where manufacturer batches, pharmacy inventory and
//! blockchain status come from. The verification engine never calls these
//! itself; callers fetch a `RecordSet` and hand it over.

mod memory;
mod rest;

pub use memory::StaticRecordSource;
pub use rest::RestRecordSource;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BatchRecord, RawBatchRecord, RecordSource as Origin};
use crate::verification::normalize::normalize_all;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Cannot reach records service at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Records service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse records response: {0}")]
    Parse(String),
}

/// Network and contract metadata. Display only: authenticity is decided on
/// each record's own `blockchainVerified` flag, never on live chain state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainStatus {
    #[serde(default)]
    pub connected: bool,
    pub network: Option<String>,
    pub chain_id: Option<u64>,
    #[serde(alias = "contract")]
    pub contract_address: Option<String>,
}

/// Fetches raw records from the outside world.
pub trait RecordSource: Send + Sync {
    /// `GET /batches`
    fn manufacturer_batches(&self) -> Result<Vec<RawBatchRecord>, SourceError>;

    /// `GET /pharmacy/medicines`
    fn pharmacy_medicines(&self) -> Result<Vec<RawBatchRecord>, SourceError>;

    /// `GET /blockchain/status`
    fn blockchain_status(&self) -> Result<BlockchainStatus, SourceError>;
}

/// Both collections, normalized and ready for the resolver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub pharmacy: Vec<BatchRecord>,
    pub manufacturer: Vec<BatchRecord>,
}

/// Fetch and normalize both collections.
pub fn fetch_record_set(source: &dyn RecordSource) -> Result<RecordSet, SourceError> {
    let manufacturer = normalize_all(source.manufacturer_batches()?, Origin::Manufacturer);
    let pharmacy = normalize_all(source.pharmacy_medicines()?, Origin::Pharmacy);

    tracing::debug!(
        manufacturer = manufacturer.len(),
        pharmacy = pharmacy.len(),
        "Fetched record set"
    );

    Ok(RecordSet {
        pharmacy,
        manufacturer,
    })
}

/// Blockchain status, or `None` with a warning when the collaborator fails.
pub fn fetch_blockchain_status(source: &dyn RecordSource) -> Option<BlockchainStatus> {
    match source.blockchain_status() {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::warn!(error = %e, "Blockchain status unavailable");
            None
        }
    }
}
