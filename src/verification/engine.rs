use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::DEFAULT_NEAR_EXPIRY_DAYS;
use crate::models::{BatchRecord, Verdict};

use super::authenticity::classify;
use super::expiry::classify_expiry;
use super::messages::verdict_message;
use super::resolver::{normalize_query, resolve};
use super::types::{Resolution, VerificationError, VerificationOutcome, VerificationResult};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of "now" and "today". Every classifier takes these explicitly;
/// only the verifier asks the clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day used as the expiry reference: the UTC date of `now()`,
    /// whatever the host time zone.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Frozen clock for deterministic checks.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

// ---------------------------------------------------------------------------
// Verifier
// ---------------------------------------------------------------------------

/// Time inputs for one verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationContext {
    pub reference_day: NaiveDate,
    pub now: DateTime<Utc>,
    pub near_expiry_days: u32,
}

impl VerificationContext {
    pub fn from_clock(clock: &dyn Clock, near_expiry_days: u32) -> Self {
        Self {
            reference_day: clock.today(),
            now: clock.now(),
            near_expiry_days,
        }
    }
}

/// Verifies a batch against already-fetched record collections.
pub trait BatchVerifier: Send + Sync {
    fn verify(
        &self,
        query: &str,
        pharmacy_records: &[BatchRecord],
        manufacturer_records: &[BatchRecord],
    ) -> Result<VerificationOutcome, VerificationError>;
}

/// Default verifier: resolve, classify expiry, classify authenticity.
#[derive(Clone)]
pub struct DefaultBatchVerifier {
    clock: Arc<dyn Clock>,
    near_expiry_days: u32,
}

impl DefaultBatchVerifier {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            near_expiry_days: DEFAULT_NEAR_EXPIRY_DAYS,
        }
    }

    pub fn with_near_expiry_days(mut self, days: u32) -> Self {
        self.near_expiry_days = days;
        self
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

impl Default for DefaultBatchVerifier {
    fn default() -> Self {
        Self::system()
    }
}

impl BatchVerifier for DefaultBatchVerifier {
    fn verify(
        &self,
        query: &str,
        pharmacy_records: &[BatchRecord],
        manufacturer_records: &[BatchRecord],
    ) -> Result<VerificationOutcome, VerificationError> {
        let ctx = VerificationContext::from_clock(self.clock.as_ref(), self.near_expiry_days);
        verify_batch(query, pharmacy_records, manufacturer_records, ctx)
    }
}

/// Run the full decision procedure for one query.
///
/// `EmptyQuery` and `InvalidDate` are returned as errors. A batch absent from
/// both collections is a normal `NotFound` outcome with `exists == false`.
pub fn verify_batch(
    query: &str,
    pharmacy_records: &[BatchRecord],
    manufacturer_records: &[BatchRecord],
    ctx: VerificationContext,
) -> Result<VerificationOutcome, VerificationError> {
    let start = Instant::now();
    let query = normalize_query(query)?;

    let found = match resolve(query, pharmacy_records, manufacturer_records) {
        Ok(merged) => {
            let expiry = classify_expiry(
                merged.record.expiry.as_ref(),
                ctx.reference_day,
                ctx.near_expiry_days,
            )?;
            Some((merged, expiry))
        }
        Err(VerificationError::NotFound { .. }) => None,
        Err(other) => return Err(other),
    };

    let resolution = match &found {
        Some((merged, expiry)) => Resolution::Found { merged, expiry },
        None => Resolution::NotFound,
    };
    let verdict = classify(resolution);
    let result = build_result(query, verdict, resolution);

    tracing::info!(
        batch_no = %result.batch_no,
        verdict = verdict.as_str(),
        days_remaining = ?result.days_remaining,
        near_expiry = result.near_expiry,
        processing_ms = start.elapsed().as_millis() as u64,
        "Batch verification complete"
    );

    let (merged, expiry) = found.unzip();
    Ok(VerificationOutcome {
        verdict,
        result,
        merged,
        expiry,
        checked_at: ctx.now,
    })
}

fn build_result(query: &str, verdict: Verdict, resolution: Resolution<'_>) -> VerificationResult {
    let message = verdict_message(verdict).to_string();
    let status = verdict.status_label().to_string();
    let authentic = verdict.is_authentic();

    let Resolution::Found { merged, expiry } = resolution else {
        return VerificationResult {
            exists: false,
            authentic,
            message,
            batch_no: query.to_string(),
            name: None,
            formulation: None,
            expiry: None,
            manufacturer: None,
            pharmacy: None,
            quantity: None,
            status,
            is_expired: false,
            days_remaining: None,
            expires_today: false,
            near_expiry: false,
            expiry_status: None,
        };
    };

    let record = &merged.record;
    VerificationResult {
        exists: true,
        authentic,
        message,
        batch_no: record.batch_no.clone(),
        name: record.name.clone(),
        formulation: record.formulation.clone(),
        expiry: Some(expiry.expiry_day),
        manufacturer: record.manufacturer.clone(),
        pharmacy: Some(merged.custody.display().to_string()),
        quantity: record.quantity,
        status,
        is_expired: expiry.is_expired,
        days_remaining: Some(expiry.days_remaining),
        expires_today: expiry.expires_today,
        near_expiry: expiry.near_expiry,
        expiry_status: Some(expiry.state()),
    }
}
