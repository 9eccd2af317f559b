use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::VerifierConfig;
use crate::models::RawBatchRecord;

use super::{BlockchainStatus, RecordSource, SourceError};

/// Envelope keys a list endpoint may wrap its array in.
const LIST_ENVELOPE_KEYS: &[&str] = &["data", "batches", "medicines", "records"];

/// Blocking HTTP client for the records REST service.
///
/// Must not be called from inside an async task; the API layer runs it on
/// `spawn_blocking`.
pub struct RestRecordSource {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl RestRecordSource {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn from_config(config: &VerifierConfig) -> Result<Self, SourceError> {
        Self::new(&config.api_base_url, config.request_timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.get(&url).send().map_err(|e| {
            if e.is_connect() {
                SourceError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                SourceError::Http(format!("Request timed out after {}s", self.timeout_secs))
            } else {
                SourceError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(url = %url, status = status.as_u16(), "Records service error");
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .map_err(|e| SourceError::Parse(e.to_string()))
    }

    fn get_records(&self, path: &str) -> Result<Vec<RawBatchRecord>, SourceError> {
        let value: serde_json::Value = self.get_json(path)?;
        let records = extract_records(value)?;
        tracing::debug!(path, count = records.len(), "Fetched records");
        Ok(records)
    }
}

impl RecordSource for RestRecordSource {
    fn manufacturer_batches(&self) -> Result<Vec<RawBatchRecord>, SourceError> {
        self.get_records("/batches")
    }

    fn pharmacy_medicines(&self) -> Result<Vec<RawBatchRecord>, SourceError> {
        self.get_records("/pharmacy/medicines")
    }

    fn blockchain_status(&self) -> Result<BlockchainStatus, SourceError> {
        let value: serde_json::Value = self.get_json("/blockchain/status")?;
        let inner = match value {
            serde_json::Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or_default()
            }
            other => other,
        };
        serde_json::from_value(inner).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

/// Accept a bare array or an object wrapping one under a known key.
fn extract_records(value: serde_json::Value) -> Result<Vec<RawBatchRecord>, SourceError> {
    let array = match value {
        serde_json::Value::Array(items) => serde_json::Value::Array(items),
        serde_json::Value::Object(mut map) => LIST_ENVELOPE_KEYS
            .iter()
            .find_map(|key| map.remove(*key).filter(|v| v.is_array()))
            .ok_or_else(|| SourceError::Parse("response has no record array".into()))?,
        other => {
            return Err(SourceError::Parse(format!(
                "expected array of records, got {other}"
            )))
        }
    };
    serde_json::from_value(array).map_err(|e| SourceError::Parse(e.to_string()))
}
