//! Category - one option under evaluation, holding its pros and cons.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Factor, FactorSide};
use crate::domain::foundation::{CategoryId, FactorId, ValidationError};

/// One option being compared.
///
/// # Invariants
///
/// - Factor ids are unique across the union of `pros` and `cons`, so a
///   factor can be addressed by id alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub pros: Vec<Factor>,
    #[serde(default)]
    pub cons: Vec<Factor>,
}

impl Category {
    /// Creates an empty category.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            pros: Vec::new(),
            cons: Vec::new(),
        }
    }

    /// Default placeholder name for the option at `index` ("Option A", "Option B", ...).
    ///
    /// Past "Option Z" the letters continue through the following code points,
    /// as the editor always did.
    pub fn placeholder_name(index: usize) -> String {
        let letter = u32::try_from(index)
            .ok()
            .and_then(|i| char::from_u32(u32::from('A') + i))
            .unwrap_or('?');
        format!("Option {}", letter)
    }

    /// Returns the factor list for one side.
    pub fn factors(&self, side: FactorSide) -> &[Factor] {
        match side {
            FactorSide::Pro => &self.pros,
            FactorSide::Con => &self.cons,
        }
    }

    /// Returns the mutable factor list for one side.
    pub fn factors_mut(&mut self, side: FactorSide) -> &mut Vec<Factor> {
        match side {
            FactorSide::Pro => &mut self.pros,
            FactorSide::Con => &mut self.cons,
        }
    }

    /// Finds a factor by id in either list.
    pub fn factor_mut(&mut self, factor_id: &FactorId) -> Option<&mut Factor> {
        self.pros
            .iter_mut()
            .chain(self.cons.iter_mut())
            .find(|f| &f.id == factor_id)
    }

    /// Removes a factor by id from whichever list holds it.
    ///
    /// Returns true when a factor was removed.
    pub fn remove_factor(&mut self, factor_id: &FactorId) -> bool {
        let before = self.pros.len() + self.cons.len();
        self.pros.retain(|f| &f.id != factor_id);
        self.cons.retain(|f| &f.id != factor_id);
        before != self.pros.len() + self.cons.len()
    }

    /// True when a factor with this id exists on either side.
    pub fn contains_factor(&self, factor_id: &FactorId) -> bool {
        self.pros.iter().chain(&self.cons).any(|f| &f.id == factor_id)
    }

    /// Checks id presence and factor id uniqueness.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::empty_field("category.id"));
        }

        let mut seen = HashSet::new();
        for factor in self.pros.iter().chain(&self.cons) {
            if factor.id.is_empty() {
                return Err(ValidationError::empty_field("factor.id"));
            }
            if !seen.insert(&factor.id) {
                return Err(ValidationError::duplicate("factor.id", factor.id.as_str()));
            }
        }
        Ok(())
    }
}
