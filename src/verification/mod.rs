//! Batch verification engine.
//!
//! Given a batch number and the pharmacy and manufacturer collections,
//! resolves one authoritative record, classifies its expiry against a
//! reference day, and derives an authenticity verdict. Pure: no I/O, no
//! shared state, inputs are never mutated.

pub mod authenticity;
pub mod dates;
pub mod engine;
pub mod expiry;
pub mod messages;
pub mod normalize;
pub mod qr;
pub mod resolver;
mod types;

pub use engine::{
    verify_batch, BatchVerifier, Clock, DefaultBatchVerifier, FixedClock, SystemClock,
    VerificationContext,
};
pub use types::*;
