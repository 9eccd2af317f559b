//! Verification API server lifecycle.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::router::verification_router;
use crate::api::types::ApiContext;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind verification API on {addr}: {reason}")]
    Bind { addr: SocketAddr, reason: String },

    #[error("Record source setup failed: {0}")]
    Source(#[from] crate::source::SourceError),

    #[error("Server task failed: {0}")]
    Task(String),
}

/// Session metadata for a running server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running verification API server.
pub struct VerificationServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl VerificationServer {
    /// Signal graceful shutdown.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Verification API shutdown signal sent");
        }
    }

    /// Wait until the server task has exited.
    pub async fn stopped(&mut self) -> Result<(), ServerError> {
        match self.task.take() {
            Some(task) => task.await.map_err(|e| ServerError::Task(e.to_string())),
            None => Ok(()),
        }
    }
}

/// Bind `addr` and serve the verification router in a background task.
pub async fn start_server(ctx: ApiContext, addr: SocketAddr) -> Result<VerificationServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind {
            addr,
            reason: e.to_string(),
        })?;

    let bound = listener.local_addr().map_err(|e| ServerError::Bind {
        addr,
        reason: e.to_string(),
    })?;

    let app = verification_router(ctx);

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: bound.to_string(),
        port: bound.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Verification API received shutdown signal");
        };

        tracing::info!(addr = %bound, "Verification API started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Verification API server error: {e}");
        }

        tracing::info!("Verification API stopped");
    });

    Ok(VerificationServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}
