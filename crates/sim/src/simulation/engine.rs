//! Clonal selection engine.
//!
//! This module provides the main search loop. Every iteration walks the
//! antigens in order and, for each one, scores the population, selects the
//! best antibodies, clones and hypermutates them, re-scores and re-selects the
//! clones, offers the best clone to the memory set, and replaces the worst
//! clones with fresh random antibodies.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::affinity::{AffinityModel, AffinityStrategy};
use crate::base::SequenceAlphabet;
use crate::errors::{InputError, Result};
use crate::evolution::{
    clone_count, clones, fraction_count, mutation_count, remove_worst, select_best, Hypermutation,
};
use crate::simulation::{
    Antibody, Antigen, Configuration, MemorySet, Population, RunStatistics, WindowPlacement,
};

/// Result of [`ClonalSelection::execute`].
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub memory: MemorySet,
    pub statistics: RunStatistics,
}

/// Main clonal selection engine.
///
/// The engine owns its population, memory and RNG; independent engines share
/// nothing and can run on separate threads.
#[derive(Debug)]
pub struct ClonalSelection {
    /// Affinity oracle
    strategy: AffinityModel,
    /// Symbols drawn for new antibodies and mutations
    alphabet: SequenceAlphabet,
    /// Run configuration
    config: Configuration,
    /// Current population
    population: Population,
    /// Best antibody per antigen
    memory: MemorySet,
    /// Point mutation operator
    mutation: Hypermutation,
    /// Random number generator (using Xoshiro256++ for better performance)
    rng: Xoshiro256PlusPlus,
    /// Selection size, fixed from the initial population size
    number_high: usize,
    /// Replacement size, fixed from the initial population size
    number_low: usize,
    degenerate_steps: usize,
    initialized: bool,
}

impl ClonalSelection {
    /// Create an engine.
    ///
    /// The RNG is seeded from `config.execution.seed`, or from the thread RNG
    /// when no seed is given.
    pub fn new(
        strategy: AffinityModel,
        alphabet: SequenceAlphabet,
        config: Configuration,
    ) -> Result<Self> {
        config.validate()?;

        let rng = if let Some(seed) = config.execution.seed {
            Xoshiro256PlusPlus::seed_from_u64(seed)
        } else {
            Xoshiro256PlusPlus::from_seed(rand::rng().random())
        };

        Ok(Self {
            strategy,
            alphabet,
            config,
            population: Population::default(),
            memory: MemorySet::new(),
            mutation: Hypermutation::new(alphabet),
            rng,
            number_high: 0,
            number_low: 0,
            degenerate_steps: 0,
            initialized: false,
        })
    }

    pub fn strategy(&self) -> &AffinityModel {
        &self.strategy
    }

    pub fn alphabet(&self) -> SequenceAlphabet {
        self.alphabet
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn memory(&self) -> &MemorySet {
        &self.memory
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.population.iteration()
    }

    /// Number of antibodies selected per antigen.
    pub fn number_high(&self) -> usize {
        self.number_high
    }

    /// Number of antibodies replaced per antigen.
    pub fn number_low(&self) -> usize {
        self.number_low
    }

    /// Per-antigen steps skipped so far.
    pub fn degenerate_steps(&self) -> usize {
        self.degenerate_steps
    }

    /// Draw a fresh population and clear the memory.
    ///
    /// The selection and replacement sizes are derived from the drawn
    /// population size and stay fixed until the next call.
    pub fn initialize(&mut self, antigens: &[Antigen]) -> Result<()> {
        self.check_antigens(antigens)?;

        let size = self.config.population.size.sample(&mut self.rng);
        self.population = Population::random(
            self.alphabet,
            size,
            self.config.population.antibody_length,
            &mut self.rng,
        );
        self.number_high = fraction_count(self.config.selection.percent_high, size);
        self.number_low = fraction_count(self.config.selection.percent_low, size);
        self.memory.clear();
        self.degenerate_steps = 0;
        self.initialized = true;

        log::debug!(
            "Initialized {} antibodies (select {}, replace {})",
            size,
            self.number_high,
            self.number_low
        );
        Ok(())
    }

    /// Run one iteration over every antigen, initializing first if needed.
    pub fn step(&mut self, antigens: &[Antigen]) -> Result<()> {
        if self.initialized {
            self.check_antigens(antigens)?;
        } else {
            self.initialize(antigens)?;
        }

        for antigen in antigens {
            self.react(antigen)?;
        }
        self.population.increment_iteration();
        Ok(())
    }

    /// Initialize, run the configured number of iterations and summarize the
    /// memory set.
    pub fn execute(&mut self, antigens: &[Antigen]) -> Result<RunOutcome> {
        let start = Instant::now();
        self.initialize(antigens)?;

        log::info!(
            "Starting clonal selection: {} strategy, {} antigens, {} antibodies, {} iterations",
            self.strategy.name(),
            antigens.len(),
            self.population.size(),
            self.config.execution.iterations
        );

        for _ in 0..self.config.execution.iterations {
            self.step(antigens)?;
        }

        let statistics = self.statistics(start.elapsed().as_secs_f64());
        if statistics.finite_entries < statistics.memory_entries {
            log::warn!(
                "{} of {} memory cells have a non-finite affinity",
                statistics.memory_entries - statistics.finite_entries,
                statistics.memory_entries
            );
        }
        log::info!(
            "Finished in {:.3}s: {} memory cells, {} degenerate steps",
            statistics.elapsed_seconds,
            statistics.memory_entries,
            statistics.degenerate_steps
        );

        Ok(RunOutcome {
            memory: self.memory.clone(),
            statistics,
        })
    }

    /// Summarize the current memory set.
    pub fn statistics(&self, elapsed_seconds: f64) -> RunStatistics {
        RunStatistics {
            elapsed_seconds,
            iterations: self.config.execution.iterations,
            percent_high: self.config.selection.percent_high,
            percent_low: self.config.selection.percent_low,
            degenerate_steps: self.degenerate_steps,
            ..RunStatistics::summarize(self.memory.affinities(), self.strategy.direction())
        }
    }

    fn check_antigens(&self, antigens: &[Antigen]) -> std::result::Result<(), InputError> {
        if antigens.is_empty() {
            return Err(InputError::NoAntigens);
        }
        let len = self.config.population.antibody_length.max();
        for antigen in antigens {
            let size = self.strategy.sequence_size(antigen);
            if len > size {
                return Err(InputError::AntibodyTooLong {
                    len,
                    size,
                    antigen: antigen.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// One selection cycle of the population against `antigen`.
    fn react(&mut self, antigen: &Antigen) -> Result<()> {
        if self.population.is_empty() {
            self.degenerate(antigen, "empty population");
            return Ok(());
        }

        let placement = self.config.population.window;
        for antibody in self.population.antibodies_mut() {
            evaluate(&self.strategy, placement, &mut self.rng, antibody, antigen)?;
        }

        let mut selected = self.population.antibodies().to_vec();
        select_best(&self.strategy, &mut selected, self.number_high);
        if selected.is_empty() {
            self.degenerate(antigen, "empty selection");
            return Ok(());
        }

        let mut offspring = Vec::new();
        for parent in &selected {
            let len = parent.effective_len();
            let rate = self.strategy.clone_rate(parent.affinity(), len, &mut self.rng);
            for mut clone in clones(parent, clone_count(rate, len)) {
                let rate = self
                    .strategy
                    .mutation_rate(clone.affinity(), len, &mut self.rng);
                self.mutation
                    .mutate(clone.sequence_mut(), mutation_count(rate, len), &mut self.rng);
                offspring.push(clone);
            }
        }
        if offspring.is_empty() {
            self.degenerate(antigen, "no clones");
            return Ok(());
        }

        for clone in offspring.iter_mut() {
            evaluate(&self.strategy, placement, &mut self.rng, clone, antigen)?;
        }
        select_best(&self.strategy, &mut offspring, self.number_high);

        if let Some(best) = offspring.first() {
            self.memory
                .insert(&self.strategy, antigen.name_handle(), best.clone());
        }

        let removed = remove_worst(&self.strategy, &mut offspring, self.number_low);
        for old in &removed {
            offspring.push(Antibody::random(self.alphabet, old.len(), &mut self.rng));
        }
        self.population.set_antibodies(offspring);
        Ok(())
    }

    fn degenerate(&mut self, antigen: &Antigen, reason: &str) {
        self.degenerate_steps += 1;
        log::debug!(
            "Degenerate step at iteration {} for antigen '{}': {}",
            self.population.iteration(),
            antigen.name(),
            reason
        );
    }
}

/// Score `antibody` against `antigen` and bind it to the antigen.
fn evaluate<R: Rng + ?Sized>(
    strategy: &AffinityModel,
    placement: WindowPlacement,
    rng: &mut R,
    antibody: &mut Antibody,
    antigen: &Antigen,
) -> std::result::Result<(), InputError> {
    let size = strategy.sequence_size(antigen);
    let len = antibody.len();
    if len > size {
        return Err(InputError::AntibodyTooLong {
            len,
            size,
            antigen: antigen.name().to_string(),
        });
    }

    let candidate = antibody.sequence().as_slice();
    let affinity = match placement {
        WindowPlacement::Random => {
            let offset = rng.random_range(0..=size - len);
            strategy.calculate(candidate, antigen, offset)?
        }
        WindowPlacement::Best => {
            let mut best = f64::NAN;
            for offset in 0..=size - len {
                let affinity = strategy.calculate(candidate, antigen, offset)?;
                if strategy.is_better(affinity, best) {
                    best = affinity;
                }
            }
            best
        }
    };

    antibody.set_affinity(affinity);
    antibody.bind(antigen.name_handle());
    Ok(())
}
