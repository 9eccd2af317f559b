use crate::models::RawBatchRecord;

use super::{BlockchainStatus, RecordSource, SourceError};

/// In-memory source over fixed collections. Used for fixtures and offline
/// checks.
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    pub manufacturer: Vec<RawBatchRecord>,
    pub pharmacy: Vec<RawBatchRecord>,
    pub status: Option<BlockchainStatus>,
}

impl StaticRecordSource {
    pub fn new(manufacturer: Vec<RawBatchRecord>, pharmacy: Vec<RawBatchRecord>) -> Self {
        Self {
            manufacturer,
            pharmacy,
            status: None,
        }
    }

    /// Build from two JSON arrays, shaped like the REST responses.
    pub fn from_json(manufacturer: &str, pharmacy: &str) -> Result<Self, SourceError> {
        let parse = |json: &str| {
            serde_json::from_str::<Vec<RawBatchRecord>>(json)
                .map_err(|e| SourceError::Parse(e.to_string()))
        };
        Ok(Self::new(parse(manufacturer)?, parse(pharmacy)?))
    }

    pub fn with_status(mut self, status: BlockchainStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl RecordSource for StaticRecordSource {
    fn manufacturer_batches(&self) -> Result<Vec<RawBatchRecord>, SourceError> {
        Ok(self.manufacturer.clone())
    }

    fn pharmacy_medicines(&self) -> Result<Vec<RawBatchRecord>, SourceError> {
        Ok(self.pharmacy.clone())
    }

    fn blockchain_status(&self) -> Result<BlockchainStatus, SourceError> {
        self.status
            .clone()
            .ok_or_else(|| SourceError::Connection("static source has no blockchain status".into()))
    }
}
