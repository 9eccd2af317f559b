//! API endpoint handlers.
//!
//! Handlers fetch records through the blocking `RecordSource` on
//! `spawn_blocking` and hand them to the verification engine.

pub mod health;
pub mod verify;
