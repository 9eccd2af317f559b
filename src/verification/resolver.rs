//! Record Resolver: picks the authoritative record for a batch number and
//! fills its gaps from the other source.
//!
//! A pharmacy record represents a later lifecycle stage than the
//! manufacturer record, so it is the base whenever it exists. Its present
//! fields are never overwritten.

use crate::models::BatchRecord;

use super::types::{Custody, MergeOrigin, MergedRecord, VerificationError};

/// Trim the query; an empty query is rejected before any lookup.
pub fn normalize_query(query: &str) -> Result<&str, VerificationError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(VerificationError::EmptyQuery);
    }
    Ok(trimmed)
}

/// Resolve `query` against both collections independently.
pub fn resolve(
    query: &str,
    pharmacy_records: &[BatchRecord],
    manufacturer_records: &[BatchRecord],
) -> Result<MergedRecord, VerificationError> {
    let query = normalize_query(query)?;

    let pharmacy_match = pharmacy_records.iter().find(|r| r.matches(query));
    let manufacturer_match = manufacturer_records.iter().find(|r| r.matches(query));

    let merged = match (pharmacy_match, manufacturer_match) {
        (Some(pharmacy), Some(manufacturer)) => {
            let mut record = pharmacy.clone();
            let backfilled = backfill_from(&mut record, manufacturer);
            let custody = Custody::Pharmacy {
                name: record.pharmacy.clone(),
            };
            MergedRecord {
                record,
                origin: MergeOrigin::Both,
                custody,
                backfilled,
            }
        }
        (Some(pharmacy), None) => {
            if pharmacy.accepted_from_manufacturer != Some(true) {
                tracing::warn!(
                    batch_no = %pharmacy.batch_no,
                    "Pharmacy record has no manufacturer counterpart and no acceptance flag"
                );
            }
            MergedRecord {
                record: pharmacy.clone(),
                origin: MergeOrigin::PharmacyOnly,
                custody: Custody::Pharmacy {
                    name: pharmacy.pharmacy.clone(),
                },
                backfilled: Vec::new(),
            }
        }
        (None, Some(manufacturer)) => MergedRecord {
            record: manufacturer.clone(),
            origin: MergeOrigin::ManufacturerOnly,
            custody: Custody::NotYetAccepted,
            backfilled: Vec::new(),
        },
        (None, None) => {
            tracing::debug!(query, "Batch not present in either collection");
            return Err(VerificationError::NotFound {
                batch_no: query.to_string(),
            });
        }
    };

    tracing::debug!(
        batch_no = %merged.record.batch_no,
        origin = ?merged.origin,
        backfilled = ?merged.backfilled,
        "Resolved authoritative record"
    );

    Ok(merged)
}

/// Copy every field absent on `base` from `fallback`. Returns the names of
/// the fields that were filled.
fn backfill_from(base: &mut BatchRecord, fallback: &BatchRecord) -> Vec<String> {
    let mut filled = Vec::new();

    macro_rules! backfill {
        ($($field:ident),+ $(,)?) => {
            $(
                if base.$field.is_none() && fallback.$field.is_some() {
                    base.$field = fallback.$field.clone();
                    filled.push(stringify!($field).to_string());
                }
            )+
        };
    }

    backfill!(
        name,
        formulation,
        manufacturer,
        expiry,
        quantity,
        blockchain_verified,
        blockchain_transaction_hash,
        manufacture_date,
        created_at,
        verified_by,
        verified_at,
    );

    filled
}
