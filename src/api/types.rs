//! Shared state for the verification API.

use std::sync::Arc;

use crate::config::VerifierConfig;
use crate::source::RecordSource;
use crate::verification::DefaultBatchVerifier;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub source: Arc<dyn RecordSource>,
    pub verifier: Arc<DefaultBatchVerifier>,
    pub config: Arc<VerifierConfig>,
}

impl ApiContext {
    pub fn new(
        source: Arc<dyn RecordSource>,
        verifier: DefaultBatchVerifier,
        config: VerifierConfig,
    ) -> Self {
        Self {
            source,
            verifier: Arc::new(verifier),
            config: Arc::new(config),
        }
    }
}
