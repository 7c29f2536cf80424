//! Scorer - weighted pros minus weighted cons, per category.

use serde::{Deserialize, Serialize};

use crate::domain::decision::{Category, Factor};

/// A category together with its derived totals.
///
/// Recomputed on every read and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCategory {
    #[serde(flatten)]
    pub category: Category,
    pub total_pros: i64,
    pub total_cons: i64,
    pub score: i64,
}

/// Score computation for categories.
pub struct Scorer;

impl Scorer {
    /// Scores a single category.
    ///
    /// # Algorithm
    /// `total_pros = Σ pro weights`, `total_cons = Σ con weights`,
    /// `score = total_pros − total_cons`
    ///
    /// # Edge Cases
    /// - Empty pro or con list: that total is 0
    /// - Factor order does not matter
    pub fn score(category: &Category) -> ScoredCategory {
        let total_pros = Self::total(&category.pros);
        let total_cons = Self::total(&category.cons);

        ScoredCategory {
            category: category.clone(),
            total_pros,
            total_cons,
            score: total_pros - total_cons,
        }
    }

    /// Scores every category, preserving order.
    pub fn score_all(categories: &[Category]) -> Vec<ScoredCategory> {
        categories.iter().map(Self::score).collect()
    }

    fn total(factors: &[Factor]) -> i64 {
        factors.iter().map(|f| f.weight.value()).sum()
    }
}
