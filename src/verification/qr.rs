//! QR payload handed to external scanners.
//!
//! Field set and order are fixed: `batchNo, timestamp, system, verifyUrl,
//! network, contract`. Unknown network or contract serialize as `null`
//! rather than being omitted.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{VerifierConfig, SYSTEM_ID};
use crate::source::BlockchainStatus;

#[derive(Error, Debug)]
pub enum QrError {
    #[error("Invalid verify URL {url}: {reason}")]
    InvalidVerifyUrl { url: String, reason: String },

    #[error("QR generation failed: {0}")]
    Encode(String),

    #[error("QR payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub batch_no: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub system: String,
    pub verify_url: String,
    pub network: Option<String>,
    pub contract: Option<String>,
}

impl QrPayload {
    pub fn to_json(&self) -> Result<String, QrError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build the payload for `batch_no`. Live blockchain status wins over the
/// configured fallbacks.
pub fn build_qr_payload(
    batch_no: &str,
    now: DateTime<Utc>,
    config: &VerifierConfig,
    status: Option<&BlockchainStatus>,
) -> Result<QrPayload, QrError> {
    let verify_url = Url::parse_with_params(&config.verify_base_url, &[("batch", batch_no)])
        .map_err(|e| QrError::InvalidVerifyUrl {
            url: config.verify_base_url.clone(),
            reason: e.to_string(),
        })?;

    let network = status
        .and_then(|s| s.network.clone())
        .or_else(|| config.network.clone());
    let contract = status
        .and_then(|s| s.contract_address.clone())
        .or_else(|| config.contract_address.clone());

    Ok(QrPayload {
        batch_no: batch_no.to_string(),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        system: SYSTEM_ID.to_string(),
        verify_url: verify_url.to_string(),
        network,
        contract,
    })
}

/// Render the payload JSON as an SVG QR code.
pub fn render_qr_svg(payload: &QrPayload) -> Result<String, QrError> {
    use qrcode::render::svg;
    use qrcode::QrCode;

    let json = payload.to_json()?;
    let code = QrCode::new(json.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .max_dimensions(320, 320)
        .dark_color(svg::Color("#0f172a"))
        .light_color(svg::Color("#ffffff"))
        .quiet_zone(true)
        .build())
}
