//! Post-run analysis of discovered patterns.
//!
//! This module provides:
//! - Pattern recovery: which expected motifs a run rediscovered
//! - Fragment joining across alignment groups

pub mod patterns;

// Re-export commonly used functions
pub use patterns::{evaluate_patterns, join_fragments, PatternReport};
