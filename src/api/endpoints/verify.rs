//! Verification endpoints.
//!
//! `GET /api/verify/:batch_no`: verdict, result, provenance timeline, QR payload.
//! `GET /api/verify/:batch_no/qr`: QR payload and rendered SVG.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::Verdict;
use crate::source::{fetch_blockchain_status, fetch_record_set, BlockchainStatus};
use crate::timeline::TimelineEvent;
use crate::verification::qr::{build_qr_payload, render_qr_svg, QrPayload};
use crate::verification::{BatchVerifier, VerificationOutcome, VerificationResult};

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub verdict: Verdict,
    pub result: VerificationResult,
    pub timeline: Vec<TimelineEvent>,
    pub qr: Option<QrPayload>,
}

#[derive(Debug, Serialize)]
pub struct QrResponse {
    pub payload: QrPayload,
    pub svg: String,
}

/// Fetch both collections and the chain status, then verify. Runs on the
/// blocking pool since the record source is synchronous.
async fn run_verification(
    ctx: &ApiContext,
    batch_no: String,
) -> Result<(VerificationOutcome, Option<BlockchainStatus>), ApiError> {
    let source = ctx.source.clone();
    let verifier = ctx.verifier.clone();

    tokio::task::spawn_blocking(move || {
        let records = fetch_record_set(source.as_ref())?;
        let outcome = verifier.verify(&batch_no, &records.pharmacy, &records.manufacturer)?;
        let status = match outcome.verdict {
            Verdict::NotFound => None,
            _ => fetch_blockchain_status(source.as_ref()),
        };
        Ok::<_, ApiError>((outcome, status))
    })
    .await?
}

/// `GET /api/verify/:batch_no`
pub async fn verify(
    State(ctx): State<ApiContext>,
    Path(batch_no): Path<String>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let (outcome, status) = run_verification(&ctx, batch_no).await?;

    let timeline: Vec<TimelineEvent> = outcome
        .timeline()
        .map(|events| events.collect())
        .unwrap_or_default();

    let qr = if outcome.result.exists {
        Some(build_qr_payload(
            &outcome.result.batch_no,
            outcome.checked_at,
            &ctx.config,
            status.as_ref(),
        )?)
    } else {
        None
    };

    Ok(Json(VerifyResponse {
        verdict: outcome.verdict,
        result: outcome.result,
        timeline,
        qr,
    }))
}

/// `GET /api/verify/:batch_no/qr`
pub async fn qr(
    State(ctx): State<ApiContext>,
    Path(batch_no): Path<String>,
) -> Result<Json<QrResponse>, ApiError> {
    let (outcome, status) = run_verification(&ctx, batch_no).await?;

    if !outcome.result.exists {
        return Err(ApiError::NotFound(outcome.result.message));
    }

    let payload = build_qr_payload(
        &outcome.result.batch_no,
        outcome.checked_at,
        &ctx.config,
        status.as_ref(),
    )?;
    let svg = render_qr_svg(&payload)?;

    Ok(Json(QrResponse { payload, svg }))
}
