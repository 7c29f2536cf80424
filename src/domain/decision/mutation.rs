//! Structural edits to a profile, applied by a single reducer.
//!
//! Every edit is a tagged [`ProfileMutation`] value. Ids of newly created
//! categories and factors are minted by the constructors, not by the
//! reducer, so [`apply_edit`] stays deterministic for a given input.

use super::{Category, Factor, FactorSide, Profile, Weight};
use crate::domain::foundation::{CategoryId, FactorId, Timestamp};

/// A single edit to a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileMutation {
    /// Rename the decision itself.
    RenameProfile { name: String },

    /// Append a category. Without a name it is called "Option X" by position.
    AddCategory {
        category_id: CategoryId,
        name: Option<String>,
    },

    /// Remove a category together with all of its factors.
    RemoveCategory { category_id: CategoryId },

    /// Rename a category.
    UpdateCategory {
        category_id: CategoryId,
        name: String,
    },

    /// Append a factor to one side of a category.
    AddFactor {
        category_id: CategoryId,
        side: FactorSide,
        factor: Factor,
    },

    /// Change a factor's description and/or weight.
    ///
    /// `weight` is raw editor input; negatives are clamped to 0.
    UpdateFactor {
        category_id: CategoryId,
        factor_id: FactorId,
        description: Option<String>,
        weight: Option<i64>,
    },

    /// Remove a factor from whichever side holds it.
    RemoveFactor {
        category_id: CategoryId,
        factor_id: FactorId,
    },

    /// Replace every category with a single empty "Option A".
    ResetCategories { category_id: CategoryId },
}

impl ProfileMutation {
    pub fn rename_profile(name: impl Into<String>) -> Self {
        Self::RenameProfile { name: name.into() }
    }

    /// Adds a category with a placeholder name.
    pub fn add_category() -> Self {
        Self::AddCategory {
            category_id: CategoryId::new(),
            name: None,
        }
    }

    pub fn add_named_category(name: impl Into<String>) -> Self {
        Self::AddCategory {
            category_id: CategoryId::new(),
            name: Some(name.into()),
        }
    }

    pub fn remove_category(category_id: CategoryId) -> Self {
        Self::RemoveCategory { category_id }
    }

    pub fn rename_category(category_id: CategoryId, name: impl Into<String>) -> Self {
        Self::UpdateCategory {
            category_id,
            name: name.into(),
        }
    }

    /// Adds a blank factor (empty description, weight 1).
    pub fn add_factor(category_id: CategoryId, side: FactorSide) -> Self {
        Self::AddFactor {
            category_id,
            side,
            factor: Factor::blank(),
        }
    }

    pub fn set_description(
        category_id: CategoryId,
        factor_id: FactorId,
        description: impl Into<String>,
    ) -> Self {
        Self::UpdateFactor {
            category_id,
            factor_id,
            description: Some(description.into()),
            weight: None,
        }
    }

    pub fn set_weight(category_id: CategoryId, factor_id: FactorId, raw_weight: i64) -> Self {
        Self::UpdateFactor {
            category_id,
            factor_id,
            description: None,
            weight: Some(raw_weight),
        }
    }

    pub fn remove_factor(category_id: CategoryId, factor_id: FactorId) -> Self {
        Self::RemoveFactor {
            category_id,
            factor_id,
        }
    }

    pub fn reset_categories() -> Self {
        Self::ResetCategories {
            category_id: CategoryId::new(),
        }
    }
}

/// Applies one edit and stamps `last_modified = now`.
///
/// Edits that address a category or factor that no longer exists leave the
/// structure unchanged; the timestamp is still refreshed.
pub fn apply_edit(profile: &Profile, mutation: ProfileMutation, now: Timestamp) -> Profile {
    let mut next = profile.clone();

    match mutation {
        ProfileMutation::RenameProfile { name } => next.name = name,

        ProfileMutation::AddCategory { category_id, name } => {
            let name = name.unwrap_or_else(|| Category::placeholder_name(next.categories.len()));
            next.categories.push(Category::new(category_id, name));
        }

        ProfileMutation::RemoveCategory { category_id } => {
            next.categories.retain(|c| c.id != category_id);
        }

        ProfileMutation::UpdateCategory { category_id, name } => {
            if let Some(category) = find_category(&mut next, &category_id) {
                category.name = name;
            }
        }

        ProfileMutation::AddFactor {
            category_id,
            side,
            factor,
        } => {
            if let Some(category) = find_category(&mut next, &category_id) {
                // Appending a duplicate id would make later edits ambiguous.
                if !category.contains_factor(&factor.id) {
                    category.factors_mut(side).push(factor);
                }
            }
        }

        ProfileMutation::UpdateFactor {
            category_id,
            factor_id,
            description,
            weight,
        } => {
            if let Some(factor) =
                find_category(&mut next, &category_id).and_then(|c| c.factor_mut(&factor_id))
            {
                if let Some(description) = description {
                    factor.description = description;
                }
                if let Some(raw) = weight {
                    factor.weight = Weight::from_raw(raw);
                }
            }
        }

        ProfileMutation::RemoveFactor {
            category_id,
            factor_id,
        } => {
            if let Some(category) = find_category(&mut next, &category_id) {
                category.remove_factor(&factor_id);
            }
        }

        ProfileMutation::ResetCategories { category_id } => {
            next.categories = vec![Category::new(category_id, Category::placeholder_name(0))];
        }
    }

    next.last_modified = now;
    next
}

fn find_category<'a>(profile: &'a mut Profile, id: &CategoryId) -> Option<&'a mut Category> {
    profile.categories.iter_mut().find(|c| &c.id == id)
}
