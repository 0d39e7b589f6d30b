//! Line pattern recognition
//!
//! - [`patterns`]: frozen catalogue of threat shapes keyed by severity
//! - [`matcher`]: sliding a shape across the line through a point

pub mod matcher;
pub mod patterns;

pub use matcher::{match_levels, match_pattern, LineMatch};
pub use patterns::{patterns, LevelRange, Pattern, Symbol, ThreatLevel, CATALOGUE};
