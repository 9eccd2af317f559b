//! Provenance timeline: the ordered lifecycle of a verified batch
//! (manufactured, registered on chain, accepted by a pharmacy, quality
//! verified, checked now), reconstructed from whichever fields the merged
//! record carries.

mod builder;
mod types;

pub use builder::*;
pub use types::*;
