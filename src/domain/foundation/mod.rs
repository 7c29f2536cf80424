//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the timestamp value object and error types
//! that form the vocabulary of the decision scale domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{CategoryId, FactorId, ProfileId};
pub use timestamp::Timestamp;
