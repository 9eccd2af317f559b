//! Verification API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the verification API router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn verification_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/verify/:batch_no", get(endpoints::verify::verify))
        .route("/verify/:batch_no/qr", get(endpoints::verify::qr))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        // The dashboard is served from a different origin.
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    use crate::config::VerifierConfig;
    use crate::source::{BlockchainStatus, StaticRecordSource};
    use crate::verification::{DefaultBatchVerifier, FixedClock};

    const MANUFACTURER_JSON: &str = r#"[
        {"batchNo":"PANT-2025-001","name":"Pantoprazole","formulation":"Tablet 40mg",
         "manufacturer":"Acme Pharma","expiry":"2026-06-30","quantity":1000,
         "blockchainVerified":false,"manufactureDate":"2025-01-10"},
        {"batchNo":"TLD-2025-010","name":"Tenofovir","manufacturer":"Acme Pharma",
         "expiry":"2025-06-01","blockchainTransactionHash":"0xfeed",
         "createdAt":"2025-01-12T09:00:00Z","manufactureDate":"2025-01-10"},
        {"batchNo":"CFG-2025-003","name":"Cefixime","expiry":"2024-05-20"},
        {"batchNo":"BAD-DATE-1","name":"Broken","expiry":"someday"}
    ]"#;

    const PHARMACY_JSON: &str = r#"[
        {"batchNo":"TLD-2025-010","pharmacyName":"City Pharmacy","expiryDate":"2025-06-01",
         "acceptedFromManufacturer":true,"acceptanceDate":"2025-03-01","quantity":"200"}
    ]"#;

    fn test_ctx() -> ApiContext {
        let source = StaticRecordSource::from_json(MANUFACTURER_JSON, PHARMACY_JSON)
            .unwrap()
            .with_status(BlockchainStatus {
                connected: true,
                network: Some("sepolia".into()),
                chain_id: Some(11_155_111),
                contract_address: Some("0x5fbd".into()),
            });
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap());
        ApiContext::new(
            Arc::new(source),
            DefaultBatchVerifier::new(Arc::new(clock)),
            VerifierConfig::default(),
        )
    }

    async fn get(uri: &str) -> Response {
        verification_router(test_ctx())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = get("/api/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["system"], "PharmaTrace");
    }

    #[tokio::test]
    async fn manufacturer_only_batch_is_unverified() {
        let response = get("/api/verify/PANT-2025-001").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        assert_eq!(json["verdict"], "unverified");
        assert_eq!(json["result"]["exists"], true);
        assert_eq!(json["result"]["authentic"], false);
        assert_eq!(json["result"]["daysRemaining"], 394);
        assert_eq!(json["result"]["pharmacy"], "Not yet accepted by pharmacy");
        assert_eq!(json["result"]["expiry"], "2026-06-30");
        assert_eq!(json["result"]["nearExpiry"], false);
        assert_eq!(json["result"]["expiryStatus"], "active");

        let timeline = json["timeline"].as_array().unwrap();
        assert_eq!(timeline.first().unwrap()["type"], "manufactured");
        assert_eq!(timeline.last().unwrap()["type"], "current_verification");
        assert_eq!(json["qr"]["batchNo"], "PANT-2025-001");
        assert_eq!(json["qr"]["network"], "sepolia");
    }

    #[tokio::test]
    async fn merged_batch_expiring_today() {
        let json = body_json(get("/api/verify/tld-2025-010").await).await;

        assert_eq!(json["verdict"], "expires_today");
        assert_eq!(json["result"]["authentic"], false);
        assert_eq!(json["result"]["expiresToday"], true);
        assert_eq!(json["result"]["daysRemaining"], 0);
        assert_eq!(json["result"]["batchNo"], "TLD-2025-010");
        assert_eq!(json["result"]["pharmacy"], "City Pharmacy");
        assert_eq!(json["result"]["quantity"], 200);
        assert_eq!(json["result"]["manufacturer"], "Acme Pharma");
        assert_eq!(json["result"]["expiryStatus"], "expires_today");

        let types: Vec<_> = json["timeline"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            types,
            vec![
                "manufactured",
                "blockchain_registered",
                "pharmacy_accepted",
                "current_verification"
            ]
        );
    }

    #[tokio::test]
    async fn expired_batch() {
        let json = body_json(get("/api/verify/CFG-2025-003").await).await;
        assert_eq!(json["verdict"], "expired");
        assert!(json["result"]["daysRemaining"].as_i64().unwrap() < 0);
    }

    #[tokio::test]
    async fn unknown_batch_is_not_found_verdict() {
        let response = get("/api/verify/UNKNOWN-001").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["verdict"], "not_found");
        assert_eq!(json["result"]["exists"], false);
        assert!(json["timeline"].as_array().unwrap().is_empty());
        assert!(json["qr"].is_null());
    }

    #[tokio::test]
    async fn blank_batch_is_bad_request() {
        let response = get("/api/verify/%20%20").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EMPTY_QUERY");
    }

    #[tokio::test]
    async fn unparsable_expiry_is_unprocessable() {
        let response = get("/api/verify/BAD-DATE-1").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn qr_endpoint_renders_svg() {
        let response = get("/api/verify/PANT-2025-001/qr").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["payload"]["system"], "PharmaTrace");
        assert_eq!(json["payload"]["contract"], "0x5fbd");
        assert!(json["svg"].as_str().unwrap().contains("<svg"));
    }

    #[tokio::test]
    async fn qr_endpoint_404_for_unknown_batch() {
        let response = get("/api/verify/UNKNOWN-001/qr").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = get("/api/batches").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
