use std::iter::FusedIterator;

use chrono::{DateTime, Utc};

use crate::config::APP_NAME;
use crate::models::{DateLike, TimelineEventType, Verdict};
use crate::verification::dates::parse_instant;
use crate::verification::messages::verdict_message;
use crate::verification::MergedRecord;

use super::types::{event_id, TimelineEvent};

const UNKNOWN_MANUFACTURER: &str = "Unknown manufacturer";
const BLOCKCHAIN_ACTOR: &str = "Blockchain network";
const QUALITY_ACTOR: &str = "Quality assurance";

#[derive(Debug, Clone, Copy)]
struct Stage {
    kind: TimelineEventType,
    at: DateTime<Utc>,
}

/// Provenance timeline of one merged record.
///
/// Stage timestamps are decided up front and sorted; each `TimelineEvent`
/// is only materialized when the iterator reaches it. The iterator is
/// consumed as it goes and cannot be restarted.
#[derive(Debug)]
pub struct Timeline<'a> {
    merged: &'a MergedRecord,
    verdict: Verdict,
    stages: std::vec::IntoIter<Stage>,
}

/// Build the timeline for `merged`, with `now` as the instant of this check.
pub fn build_timeline(merged: &MergedRecord, verdict: Verdict, now: DateTime<Utc>) -> Timeline<'_> {
    let record = &merged.record;
    let mut stages = Vec::with_capacity(5);

    if let Some(at) = optional_instant(record.manufacture_date.as_ref(), "manufactureDate", &record.batch_no) {
        stages.push(Stage {
            kind: TimelineEventType::Manufactured,
            at,
        });
    }

    if record.blockchain_transaction_hash.is_some() {
        let at = optional_instant(record.created_at.as_ref(), "createdAt", &record.batch_no)
            .unwrap_or(now);
        stages.push(Stage {
            kind: TimelineEventType::BlockchainRegistered,
            at,
        });
    }

    if record.accepted_from_manufacturer == Some(true) {
        if let Some(at) =
            optional_instant(record.acceptance_date.as_ref(), "acceptanceDate", &record.batch_no)
        {
            stages.push(Stage {
                kind: TimelineEventType::PharmacyAccepted,
                at,
            });
        }
    }

    if record.verified_at.is_some() || record.verified_by.is_some() {
        let at = optional_instant(record.verified_at.as_ref(), "verifiedAt", &record.batch_no)
            .unwrap_or(now);
        stages.push(Stage {
            kind: TimelineEventType::Verified,
            at,
        });
    }

    // Source stages in time order. The current check closes the timeline
    // even when a source date lies in the future.
    stages.sort_by_key(|s| (s.at.timestamp(), s.kind.rank()));
    stages.push(Stage {
        kind: TimelineEventType::CurrentVerification,
        at: now,
    });

    Timeline {
        merged,
        verdict,
        stages: stages.into_iter(),
    }
}

/// Parse an optional timeline date. Unparsable values are skipped.
fn optional_instant(value: Option<&DateLike>, field: &str, batch_no: &str) -> Option<DateTime<Utc>> {
    let value = value?;
    let parsed = parse_instant(value);
    if parsed.is_none() {
        tracing::warn!(batch_no, field, value = %value, "Skipping unparsable timeline date");
    }
    parsed
}

impl Timeline<'_> {
    fn materialize(&self, stage: Stage) -> TimelineEvent {
        let record = &self.merged.record;
        let product = record.name.as_deref().unwrap_or("Medicine");

        let (description, actor, transaction_ref) = match stage.kind {
            TimelineEventType::Manufactured => (
                format!("{product} batch {} manufactured", record.batch_no),
                record
                    .manufacturer
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_MANUFACTURER.to_string()),
                None,
            ),
            TimelineEventType::BlockchainRegistered => (
                "Batch registered on the blockchain".to_string(),
                BLOCKCHAIN_ACTOR.to_string(),
                record.blockchain_transaction_hash.clone(),
            ),
            TimelineEventType::PharmacyAccepted => (
                "Accepted into pharmacy inventory from the manufacturer".to_string(),
                self.merged.custody.display().to_string(),
                None,
            ),
            TimelineEventType::Verified => (
                "Quality verification completed".to_string(),
                record
                    .verified_by
                    .clone()
                    .unwrap_or_else(|| QUALITY_ACTOR.to_string()),
                None,
            ),
            TimelineEventType::CurrentVerification => (
                format!(
                    "Authenticity check ({}): {}",
                    self.verdict.status_label(),
                    verdict_message(self.verdict)
                ),
                format!("{APP_NAME} verifier"),
                None,
            ),
        };

        TimelineEvent {
            id: event_id(&record.batch_no, stage.kind),
            event_type: stage.kind,
            timestamp_seconds: stage.at.timestamp(),
            description,
            actor,
            transaction_ref,
            icon: stage.kind.icon().to_string(),
        }
    }
}

impl Iterator for Timeline<'_> {
    type Item = TimelineEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let stage = self.stages.next()?;
        Some(self.materialize(stage))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stages.size_hint()
    }
}

impl ExactSizeIterator for Timeline<'_> {}

impl FusedIterator for Timeline<'_> {}
