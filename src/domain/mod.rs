//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamp, errors)
//! - `decision` - Profiles, categories, factors, edits and templates
//! - `analysis` - Pure scoring and scale-mapping services

pub mod analysis;
pub mod decision;
pub mod foundation;
