//! Builder pattern for creating clonal selection engines.
//!
//! Provides a fluent API for configuring an engine with sensible defaults and
//! validation.

use crate::affinity::AffinityModel;
use crate::base::SequenceAlphabet;
use crate::errors::{ConfigError, Result};
use crate::simulation::{ClonalSelection, Configuration, SizeSpec, WindowPlacement};

/// Builder for constructing [`ClonalSelection`] instances with a fluent API.
///
/// Only the affinity strategy is required. The alphabet defaults to the one
/// the strategy was built for; everything else starts from
/// [`Configuration::default`].
///
/// # Examples
///
/// ```
/// use clonalg_sim::affinity::HammingSimilarity;
/// use clonalg_sim::base::SequenceAlphabet;
/// use clonalg_sim::simulation::ClonalSelectionBuilder;
///
/// let engine = ClonalSelectionBuilder::new()
///     .strategy(HammingSimilarity)
///     .alphabet(SequenceAlphabet::Dna)
///     .iterations(50)
///     .population_size(20)
///     .antibody_length(6)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(engine.config().execution.iterations, 50);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClonalSelectionBuilder {
    strategy: Option<AffinityModel>,
    alphabet: Option<SequenceAlphabet>,
    config: Configuration,
}

impl ClonalSelectionBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the affinity strategy (required).
    pub fn strategy(mut self, strategy: impl Into<AffinityModel>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Set the alphabet antibodies are drawn from.
    ///
    /// Required for strategies that work over any alphabet.
    pub fn alphabet(mut self, alphabet: SequenceAlphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Replace the whole configuration. Later setters still apply on top.
    pub fn configuration(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    /// Set the iteration budget (default: 1000).
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.config.execution.iterations = iterations;
        self
    }

    /// Set the fraction selected for cloning (default: 0.8).
    pub fn percent_high(mut self, fraction: f64) -> Self {
        self.config.selection.percent_high = fraction;
        self
    }

    /// Set the fraction replaced by fresh antibodies (default: 0.2).
    pub fn percent_low(mut self, fraction: f64) -> Self {
        self.config.selection.percent_low = fraction;
        self
    }

    /// Use a fixed population size.
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population.size = SizeSpec::Fixed(size);
        self
    }

    /// Draw the population size uniformly from `min..=max` (default: 1..=100).
    pub fn population_range(mut self, min: usize, max: usize) -> Self {
        self.config.population.size = SizeSpec::Range { min, max };
        self
    }

    /// Use a fixed antibody length (default: 8).
    pub fn antibody_length(mut self, len: usize) -> Self {
        self.config.population.antibody_length = SizeSpec::Fixed(len);
        self
    }

    /// Draw each antibody's length uniformly from `min..=max`.
    pub fn antibody_length_range(mut self, min: usize, max: usize) -> Self {
        self.config.population.antibody_length = SizeSpec::Range { min, max };
        self
    }

    /// Set how shorter antibodies are placed against antigens.
    pub fn window(mut self, window: WindowPlacement) -> Self {
        self.config.population.window = window;
        self
    }

    /// Set the random seed for reproducibility (default: None = random).
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.execution.seed = Some(seed);
        self
    }

    /// Build and validate the engine.
    pub fn build(self) -> Result<ClonalSelection> {
        let strategy = self
            .strategy
            .ok_or(ConfigError::MissingRequired("strategy"))?;
        let alphabet = self
            .alphabet
            .or_else(|| strategy.alphabet())
            .ok_or(ConfigError::MissingRequired("alphabet"))?;

        ClonalSelection::new(strategy, alphabet, self.config)
    }
}
