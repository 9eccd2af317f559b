//! Field normalization: collapses the per-source aliases of a raw record
//! into one canonical `BatchRecord` before any classification runs.

use crate::models::{BatchRecord, DateLike, RawBatchRecord, RecordSource};

/// Normalize one raw record. Records without a usable batch number are
/// dropped since they can never match a query.
pub fn normalize(raw: RawBatchRecord, source: RecordSource) -> Option<BatchRecord> {
    let batch_no = clean_text(raw.batch_no)?;

    Some(BatchRecord {
        source,
        batch_no,
        name: clean_text(raw.name),
        formulation: clean_text(raw.formulation),
        manufacturer: clean_text(raw.manufacturer),
        expiry: clean_date(raw.expiry).or_else(|| clean_date(raw.expiry_date)),
        quantity: raw.quantity.as_ref().and_then(parse_quantity),
        blockchain_verified: raw.blockchain_verified,
        blockchain_transaction_hash: clean_text(raw.blockchain_transaction_hash),
        manufacture_date: clean_date(raw.manufacture_date),
        created_at: clean_date(raw.created_at),
        pharmacy: clean_text(raw.pharmacy_name).or_else(|| clean_text(raw.pharmacy)),
        accepted_from_manufacturer: raw.accepted_from_manufacturer,
        acceptance_date: clean_date(raw.acceptance_date),
        verified_by: clean_text(raw.verified_by),
        verified_at: clean_date(raw.verified_at),
    })
}

/// Normalize a whole collection from one source.
pub fn normalize_all(
    raws: impl IntoIterator<Item = RawBatchRecord>,
    source: RecordSource,
) -> Vec<BatchRecord> {
    let mut dropped = 0usize;
    let records: Vec<BatchRecord> = raws
        .into_iter()
        .filter_map(|raw| {
            let normalized = normalize(raw, source);
            if normalized.is_none() {
                dropped += 1;
            }
            normalized
        })
        .collect();

    if dropped > 0 {
        tracing::debug!(
            source = source.as_str(),
            dropped,
            "Dropped records without a batch number"
        );
    }
    records
}

fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn clean_date(value: Option<DateLike>) -> Option<DateLike> {
    match value {
        Some(DateLike::Text(s)) if s.trim().is_empty() => None,
        Some(DateLike::Other(serde_json::Value::Null)) => None,
        other => other,
    }
}

fn parse_quantity(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
