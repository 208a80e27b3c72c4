//! Run configuration.
//!
//! A [`Configuration`] holds everything needed to reproduce a run apart from
//! the input alignment: iteration budget, seed, selection fractions,
//! population shape and profile training parameters. It round-trips through
//! JSON so a run can be described entirely by a file.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, InputError, Result};
use crate::profile::ProfileConfig;

/// The master configuration struct.
/// Can be deserialized from a file to fully reproduce a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub execution: ExecutionConfig,
    pub selection: SelectionConfig,
    pub population: PopulationConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Loop budget and seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Number of iterations over the antigen set
    pub iterations: usize,
    /// Optional RNG seed for reproducibility
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Selection fractions, both relative to the initial population size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Fraction of the population selected for cloning
    pub percent_high: f64,
    /// Fraction of the re-selected set replaced by fresh antibodies
    pub percent_low: f64,
}

/// Shape of the initial population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of antibodies
    pub size: SizeSpec,
    /// Length of each antibody
    pub antibody_length: SizeSpec,
    /// How shorter antibodies are placed against an antigen
    #[serde(default)]
    pub window: WindowPlacement,
}

/// A fixed count or a uniform draw from an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSpec {
    Fixed(usize),
    Range { min: usize, max: usize },
}

impl SizeSpec {
    /// Smallest value that can be drawn.
    pub fn min(&self) -> usize {
        match *self {
            Self::Fixed(n) => n,
            Self::Range { min, .. } => min,
        }
    }

    /// Largest value that can be drawn.
    pub fn max(&self) -> usize {
        match *self {
            Self::Fixed(n) => n,
            Self::Range { max, .. } => max,
        }
    }

    /// Draw a value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match *self {
            Self::Fixed(n) => n,
            Self::Range { min, max } => rng.random_range(min..=max),
        }
    }

    fn validate(&self, name: &'static str) -> std::result::Result<(), ConfigError> {
        match *self {
            Self::Range { min, max } if min > max => {
                Err(ConfigError::InvalidRange { name, min, max })
            }
            _ => Ok(()),
        }
    }
}

/// Where a candidate shorter than the scoring size is placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowPlacement {
    /// A uniformly drawn offset, redrawn at every evaluation.
    #[default]
    Random,
    /// Every offset is scored and the best kept.
    Best,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            execution: ExecutionConfig {
                iterations: 1000,
                seed: None,
            },
            selection: SelectionConfig {
                percent_high: 0.8,
                percent_low: 0.2,
            },
            population: PopulationConfig {
                size: SizeSpec::Range { min: 1, max: 100 },
                antibody_length: SizeSpec::Fixed(8),
                window: WindowPlacement::Random,
            },
            profile: ProfileConfig::default(),
        }
    }
}

impl Configuration {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> std::result::Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field that has a restricted domain.
    ///
    /// # Errors
    /// - `ConfigError` for a zero iteration budget, fractions outside
    ///   `[0, 1]` or NaN, inverted ranges, an empty population or invalid
    ///   profile parameters.
    /// - `InputError::ZeroLengthAntibody` when antibodies could have length 0.
    pub fn validate(&self) -> Result<()> {
        if self.execution.iterations == 0 {
            return Err(ConfigError::ZeroIterations.into());
        }
        check_fraction("percent_high", self.selection.percent_high)?;
        check_fraction("percent_low", self.selection.percent_low)?;

        self.population.size.validate("population.size")?;
        if self.population.size.min() == 0 {
            return Err(ConfigError::EmptyPopulation.into());
        }

        self.population
            .antibody_length
            .validate("population.antibody_length")?;
        if self.population.antibody_length.min() == 0 {
            return Err(InputError::ZeroLengthAntibody.into());
        }

        self.profile.validate()?;
        Ok(())
    }
}

fn check_fraction(name: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidFraction(name, value))
    }
}
