//! Decision Scale - weighted pros/cons comparisons on a symmetric scale.
//!
//! Users build decision profiles made of options (categories), each with
//! weighted pros and cons. A category's score is its pro weight minus its
//! con weight, and every category is placed on one shared scale centered
//! on zero.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
pub mod telemetry;
