use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::TimelineEventType;

/// A single lifecycle event on a batch's provenance timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Stable per batch and event type.
    pub id: Uuid,
    #[serde(rename = "type")]
    pub event_type: TimelineEventType,
    pub timestamp_seconds: i64,
    pub description: String,
    pub actor: String,
    pub transaction_ref: Option<String>,
    pub icon: String,
}

/// Deterministic id for `event_type` on `batch_no`.
pub fn event_id(batch_no: &str, event_type: TimelineEventType) -> Uuid {
    let key = format!("{}:{}", batch_no.to_lowercase(), event_type.as_str());
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
}
