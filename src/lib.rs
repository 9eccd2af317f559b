pub mod api;
pub mod config;
pub mod models;
pub mod source;
pub mod timeline;
pub mod verification;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{start_server, ApiContext, ServerError};
use crate::config::VerifierConfig;
use crate::source::RestRecordSource;
use crate::verification::DefaultBatchVerifier;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Serve the verification API until Ctrl-C.
pub async fn run() -> Result<(), ServerError> {
    init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = VerifierConfig::from_env();
    tracing::info!(
        api_base_url = %config.api_base_url,
        bind_addr = %config.bind_addr,
        "Configuration loaded"
    );

    // The blocking client owns its own runtime; build it off the async workers.
    let source_config = config.clone();
    let source = tokio::task::spawn_blocking(move || RestRecordSource::from_config(&source_config))
        .await
        .map_err(|e| ServerError::Task(e.to_string()))??;

    let bind_addr = config.bind_addr;
    let verifier = DefaultBatchVerifier::system().with_near_expiry_days(config.near_expiry_days);
    let ctx = ApiContext::new(Arc::new(source), verifier, config);
    let mut server = start_server(ctx, bind_addr).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    server.shutdown();
    server.stopped().await
}
