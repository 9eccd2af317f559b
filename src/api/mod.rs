//! HTTP surface for batch verification.
//!
//! `verification_router()` returns a composable `Router` mounted under
//! `/api/`; `start_server()` binds it and hands back a shutdown handle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::verification_router;
pub use server::{start_server, ServerError, ServerSession, VerificationServer};
pub use types::ApiContext;
