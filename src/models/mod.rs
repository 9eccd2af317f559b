pub mod batch;
pub mod enums;

pub use batch::*;
pub use enums::*;

use thiserror::Error;

/// Returned when a closed-set label does not match any known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid enum value for {field}: {value}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}
