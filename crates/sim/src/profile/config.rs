//! Profile model training and scoring parameters.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// How a zero emission or transition factor enters a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroPolicy {
    /// A zero factor is skipped (treated as 1).
    #[default]
    Neutral,
    /// Zero factors multiply through and the whole score becomes 0.
    Absorbing,
}

impl ZeroPolicy {
    /// Fold `factor` into the running product `acc`.
    #[inline(always)]
    pub fn apply(self, acc: f64, factor: f64) -> f64 {
        match self {
            Self::Neutral if factor == 0.0 => acc,
            _ => acc * factor,
        }
    }
}

/// Scale on which a profile model reports affinities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Raw best-path probability.
    #[default]
    Probability,
    /// Natural-log odds against a uniform background.
    LogOdds,
}

/// Parameters for [`ProfileModel::train`](super::ProfileModel::train) and
/// scoring.
///
/// Column classification, with `g` the fraction of sequences holding a gap
/// in the column:
///
/// - `g == 0` gives a Match state;
/// - `0 < g < delete_threshold` gives a Delete state;
/// - `g >= delete_threshold` (all-gap columns included) gives an Insert
///   state. With `collapse_inserts`, a run of adjacent Insert columns becomes
///   a single state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Gapped fraction at which a column stops being a Delete state.
    pub delete_threshold: f64,
    /// Merge adjacent Insert columns into one state.
    pub collapse_inserts: bool,
    /// Treatment of zero factors, fixed for the whole profile.
    pub zero_policy: ZeroPolicy,
    /// Whether affinities are probabilities or log-odds.
    pub scoring: ScoringMode,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            delete_threshold: 0.5,
            collapse_inserts: true,
            zero_policy: ZeroPolicy::Neutral,
            scoring: ScoringMode::Probability,
        }
    }
}

impl ProfileConfig {
    /// Check that the threshold is a fraction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.delete_threshold) {
            return Err(ConfigError::InvalidProfileParameter(format!(
                "delete_threshold must be between 0.0 and 1.0, got {}",
                self.delete_threshold
            )));
        }
        Ok(())
    }
}
