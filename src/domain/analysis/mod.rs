//! Analysis Module - Pure domain services for scoring and visualization.
//!
//! # Components
//!
//! - `Scorer` - per-category totals and score (pros minus cons)
//! - `ScaleMapper` - symmetric range limit, axis ticks, score to position
//!
//! All functions are pure and total over finite integer input. They are
//! recomputed on every read; nothing here is cached or persisted.

mod scale;
mod scorer;

pub use scale::{
    Polarity, Scale, ScaleMapper, ScaleMarker, Tick, CENTER_POSITION, MIN_RANGE_LIMIT,
    UNTITLED_LABEL,
};
pub use scorer::{ScoredCategory, Scorer};
