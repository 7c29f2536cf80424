//! Factor value object - a single weighted pro or con.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::FactorId;

/// Non-negative importance of a factor.
///
/// Stored as `u32`, so a negative weight is unrepresentable. Raw user input
/// goes through [`Weight::from_raw`], which clamps instead of rejecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(u32);

impl Weight {
    /// Weight given to a freshly added factor.
    pub const NEW_FACTOR: Weight = Weight(1);

    /// Zero weight; the factor contributes nothing.
    pub const ZERO: Weight = Weight(0);

    /// Creates a weight from an already non-negative value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Clamps raw editor input: negatives become 0, oversize values saturate.
    pub fn from_raw(raw: i64) -> Self {
        Self(u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
    }

    /// Returns the weight as a signed value for score arithmetic.
    pub fn value(&self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::NEW_FACTOR
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which list of a category a factor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorSide {
    Pro,
    Con,
}

/// A single pro or con: free-text description plus weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    pub id: FactorId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weight: Weight,
}

impl Factor {
    /// Creates a factor with the given fields.
    pub fn new(id: FactorId, description: impl Into<String>, weight: Weight) -> Self {
        Self {
            id,
            description: description.into(),
            weight,
        }
    }

    /// A new, empty factor as added from the editor: fresh id, weight 1.
    pub fn blank() -> Self {
        Self::new(FactorId::new(), String::new(), Weight::NEW_FACTOR)
    }
}
