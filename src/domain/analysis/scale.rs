//! Scale Mapper - symmetric range, tick generation and score projection.
//!
//! Scores are placed on a vertical axis spanning `[-L, +L]` where `L` is the
//! range limit. Positions are fractions from the top: `0.0` is `+L`, `0.5`
//! is zero, `1.0` is `-L`.

use serde::{Deserialize, Serialize};

use super::ScoredCategory;
use crate::domain::foundation::CategoryId;

/// Smallest range limit; also the limit for an empty scale.
pub const MIN_RANGE_LIMIT: i64 = 10;

/// Position of the zero marker.
pub const CENTER_POSITION: f64 = 0.5;

/// Label shown for a marker whose category has no name.
pub const UNTITLED_LABEL: &str = "Untitled";

/// Sign of a category's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub fn of(score: i64) -> Self {
        match score {
            s if s > 0 => Polarity::Positive,
            s if s < 0 => Polarity::Negative,
            _ => Polarity::Neutral,
        }
    }
}

/// An axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: i64,
    pub label: String,
    pub position: f64,
}

/// A category placed on the scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleMarker {
    pub category_id: CategoryId,
    pub label: String,
    pub score: i64,
    pub total_pros: i64,
    pub total_cons: i64,
    pub position: f64,
    pub polarity: Polarity,
}

/// Everything needed to draw the scale for one set of scored categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    pub range_limit: i64,
    pub center: f64,
    pub ticks: Vec<Tick>,
    pub markers: Vec<ScaleMarker>,
}

/// Maps scores onto the bounded visual axis.
pub struct ScaleMapper;

impl ScaleMapper {
    /// Symmetric bound of the scale.
    ///
    /// # Algorithm
    /// `max(10, ceil(1.2 × max|score|))`, evaluated exactly as
    /// `ceil(6 × max|score| / 5)`.
    ///
    /// # Edge Cases
    /// - Empty input: 10
    /// - Limits beyond `i64::MAX` saturate instead of overflowing
    pub fn compute_range_limit(scores: &[i64]) -> i64 {
        let Some(max_abs) = scores.iter().map(|s| s.unsigned_abs()).max() else {
            return MIN_RANGE_LIMIT;
        };

        let padded = (u128::from(max_abs) * 6).div_ceil(5);
        i64::try_from(padded)
            .unwrap_or(i64::MAX)
            .max(MIN_RANGE_LIMIT)
    }

    /// Range limit for a set of scored categories.
    pub fn range_limit_for(categories: &[ScoredCategory]) -> i64 {
        let scores: Vec<i64> = categories.iter().map(|c| c.score).collect();
        Self::compute_range_limit(&scores)
    }

    /// Fraction from the top of the axis: `0.5 − (score / range_limit) × 0.5`.
    ///
    /// Not clamped. A score beyond `±range_limit` lands outside `[0, 1]`
    /// and the caller decides whether to clip.
    pub fn to_position(score: i64, range_limit: i64) -> f64 {
        let normalized = (score as f64 / range_limit as f64) * 0.5;
        CENTER_POSITION - normalized
    }

    /// Axis tick values in ascending order.
    ///
    /// # Algorithm
    /// `step = ceil(range_limit / 5)`; every multiple of `step` within
    /// `[-range_limit, +range_limit]`, skipping 0 (drawn as the center marker)
    /// and any value with `|v| ≥ 0.95 × range_limit`.
    ///
    /// # Edge Cases
    /// - `range_limit ≤ 0`: no ticks
    pub fn generate_ticks(range_limit: i64) -> Vec<i64> {
        if range_limit <= 0 {
            return Vec::new();
        }

        let step = range_limit / 5 + i64::from(range_limit % 5 != 0);
        let max_k = range_limit / step;

        (-max_k..=max_k)
            .map(|k| k * step)
            .filter(|&v| v != 0 && !Self::near_edge(v, range_limit))
            .collect()
    }

    /// Text for a tick: explicit `+` on positive values.
    pub fn tick_label(value: i64) -> String {
        if value > 0 {
            format!("+{}", value)
        } else {
            value.to_string()
        }
    }

    /// Builds the full scale: range, ticks and one marker per category.
    ///
    /// Categories with identical scores share a position; nothing is
    /// de-overlapped here.
    pub fn map(categories: &[ScoredCategory]) -> Scale {
        let range_limit = Self::range_limit_for(categories);

        let ticks = Self::generate_ticks(range_limit)
            .into_iter()
            .map(|value| Tick {
                value,
                label: Self::tick_label(value),
                position: Self::to_position(value, range_limit),
            })
            .collect();

        let markers = categories
            .iter()
            .map(|c| ScaleMarker {
                category_id: c.category.id.clone(),
                label: if c.category.name.is_empty() {
                    UNTITLED_LABEL.to_string()
                } else {
                    c.category.name.clone()
                },
                score: c.score,
                total_pros: c.total_pros,
                total_cons: c.total_cons,
                position: Self::to_position(c.score, range_limit),
                polarity: Polarity::of(c.score),
            })
            .collect();

        Scale {
            range_limit,
            center: CENTER_POSITION,
            ticks,
            markers,
        }
    }

    // |v| >= 0.95 * limit, in integers: 20|v| >= 19 * limit
    fn near_edge(value: i64, range_limit: i64) -> bool {
        i128::from(value).abs() * 20 >= i128::from(range_limit) * 19
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::Scorer;
    use crate::domain::decision::{Category, Factor, Weight};
    use crate::domain::foundation::FactorId;
    use proptest::prelude::*;

    fn scored(name: &str, pros: &[u32], cons: &[u32]) -> ScoredCategory {
        let mut category = Category::new(CategoryId::new(), name);
        category.pros = pros
            .iter()
            .map(|&w| Factor::new(FactorId::new(), "", Weight::new(w)))
            .collect();
        category.cons = cons
            .iter()
            .map(|&w| Factor::new(FactorId::new(), "", Weight::new(w)))
            .collect();
        Scorer::score(&category)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_input_uses_default_limit() {
        assert_eq!(ScaleMapper::compute_range_limit(&[]), 10);
    }

    #[test]
    fn small_scores_use_minimum_limit() {
        assert_eq!(ScaleMapper::compute_range_limit(&[0]), 10);
        assert_eq!(ScaleMapper::compute_range_limit(&[4, -5]), 10);
        assert_eq!(ScaleMapper::compute_range_limit(&[8]), 10);
    }

    #[test]
    fn large_scores_get_twenty_percent_headroom() {
        assert_eq!(ScaleMapper::compute_range_limit(&[9]), 11);
        assert_eq!(ScaleMapper::compute_range_limit(&[-20, 3]), 24);
        assert_eq!(ScaleMapper::compute_range_limit(&[21]), 26);
        assert_eq!(ScaleMapper::compute_range_limit(&[25]), 30);
    }

    #[test]
    fn extreme_scores_saturate() {
        assert_eq!(ScaleMapper::compute_range_limit(&[i64::MIN]), i64::MAX);
        assert_eq!(ScaleMapper::compute_range_limit(&[i64::MAX]), i64::MAX);
    }

    #[test]
    fn positions_of_center_and_edges_are_exact() {
        assert_eq!(ScaleMapper::to_position(0, 10), 0.5);
        assert_eq!(ScaleMapper::to_position(10, 10), 0.0);
        assert_eq!(ScaleMapper::to_position(-10, 10), 1.0);
    }

    #[test]
    fn out_of_band_scores_are_not_clamped() {
        assert_close(ScaleMapper::to_position(20, 10), -0.5);
        assert_close(ScaleMapper::to_position(-30, 10), 2.0);
    }

    #[test]
    fn ticks_for_minimum_limit() {
        assert_eq!(
            ScaleMapper::generate_ticks(10),
            vec![-8, -6, -4, -2, 2, 4, 6, 8]
        );
    }

    #[test]
    fn ticks_for_limit_with_remainder() {
        // step = ceil(11 / 5) = 3; 9 < 10.45
        assert_eq!(ScaleMapper::generate_ticks(11), vec![-9, -6, -3, 3, 6, 9]);
    }

    #[test]
    fn ticks_drop_values_at_the_edge() {
        // step = 4; 20 >= 0.95 * 20
        assert_eq!(
            ScaleMapper::generate_ticks(20),
            vec![-16, -12, -8, -4, 4, 8, 12, 16]
        );
        // step = 6; 30 >= 28.5
        assert_eq!(
            ScaleMapper::generate_ticks(30),
            vec![-24, -18, -12, -6, 6, 12, 18, 24]
        );
    }

    #[test]
    fn non_positive_limit_has_no_ticks() {
        assert!(ScaleMapper::generate_ticks(0).is_empty());
        assert!(ScaleMapper::generate_ticks(-10).is_empty());
    }

    #[test]
    fn tick_labels_carry_sign() {
        assert_eq!(ScaleMapper::tick_label(4), "+4");
        assert_eq!(ScaleMapper::tick_label(-4), "-4");
    }

    #[test]
    fn single_neutral_category_sits_at_center() {
        let scale = ScaleMapper::map(&[scored("Only", &[], &[])]);

        assert_eq!(scale.range_limit, 10);
        assert_eq!(scale.markers[0].position, 0.5);
        assert_eq!(scale.markers[0].polarity, Polarity::Neutral);
        let values: Vec<i64> = scale.ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![-8, -6, -4, -2, 2, 4, 6, 8]);
    }

    #[test]
    fn two_categories_scenario() {
        let scale = ScaleMapper::map(&[
            scored("Up", &[9, 6], &[7, 4]),
            scored("Down", &[], &[5]),
        ]);

        assert_eq!(scale.range_limit, 10);
        assert_close(scale.markers[0].position, 0.3);
        assert_close(scale.markers[1].position, 0.75);
        assert_eq!(scale.markers[0].polarity, Polarity::Positive);
        assert_eq!(scale.markers[1].polarity, Polarity::Negative);
        assert_eq!(scale.markers[0].total_pros, 15);
        assert_eq!(scale.markers[0].total_cons, 11);
    }

    #[test]
    fn identical_scores_share_a_position() {
        let scale = ScaleMapper::map(&[scored("A", &[3], &[]), scored("B", &[1, 2], &[])]);
        assert_eq!(scale.markers.len(), 2);
        assert_eq!(scale.markers[0].position, scale.markers[1].position);
    }

    #[test]
    fn unnamed_category_is_labelled_untitled() {
        let scale = ScaleMapper::map(&[scored("", &[1], &[])]);
        assert_eq!(scale.markers[0].label, "Untitled");
    }

    #[test]
    fn tick_entries_carry_label_and_position() {
        let scale = ScaleMapper::map(&[]);
        let first = &scale.ticks[0];
        assert_eq!(first.value, -8);
        assert_eq!(first.label, "-8");
        assert_close(first.position, 0.9);
        assert_eq!(scale.center, 0.5);
    }

    #[test]
    fn scale_serializes_camel_case() {
        let json = serde_json::to_value(ScaleMapper::map(&[scored("A", &[1], &[])])).unwrap();
        assert_eq!(json["rangeLimit"], 10);
        assert_eq!(json["markers"][0]["polarity"], "positive");
        assert_eq!(json["markers"][0]["totalPros"], 1);
    }

    proptest! {
        #[test]
        fn range_limit_is_monotonic(a in 0i64..1_000_000, b in 0i64..1_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                ScaleMapper::compute_range_limit(&[lo]) <= ScaleMapper::compute_range_limit(&[-hi])
            );
        }

        #[test]
        fn range_limit_bounds_every_score(scores in prop::collection::vec(-1_000_000i64..1_000_000, 1..30)) {
            let limit = ScaleMapper::compute_range_limit(&scores);
            prop_assert!(limit >= MIN_RANGE_LIMIT);
            for score in scores {
                let position = ScaleMapper::to_position(score, limit);
                prop_assert!((0.0..=1.0).contains(&position));
            }
        }

        #[test]
        fn zero_and_edges_map_exactly(scores in prop::collection::vec(-1_000_000i64..1_000_000, 0..30)) {
            let limit = ScaleMapper::compute_range_limit(&scores);
            prop_assert_eq!(ScaleMapper::to_position(0, limit), 0.5);
            prop_assert_eq!(ScaleMapper::to_position(limit, limit), 0.0);
            prop_assert_eq!(ScaleMapper::to_position(-limit, limit), 1.0);
        }

        #[test]
        fn ticks_skip_zero_and_edges(limit in 10i64..10_000_000) {
            let ticks = ScaleMapper::generate_ticks(limit);
            prop_assert!(!ticks.is_empty());
            prop_assert!(ticks.windows(2).all(|w| w[0] < w[1]));
            for value in &ticks {
                prop_assert!(*value != 0);
                prop_assert!((value.abs() as f64) < 0.95 * limit as f64);
            }
            prop_assert_eq!(ticks, ScaleMapper::generate_ticks(limit));
        }
    }
}
