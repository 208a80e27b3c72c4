//! Population management.
//!
//! The population is an ordered collection of antibodies whose size varies
//! while an iteration runs: it grows through cloning and shrinks through
//! selection.

use rand::Rng;

use crate::base::SequenceAlphabet;
use crate::simulation::{Antibody, SizeSpec};

/// An ordered collection of antibodies plus an iteration counter.
#[derive(Debug, Clone, Default)]
pub struct Population {
    /// The antibodies in this population
    antibodies: Vec<Antibody>,
    /// Completed iterations
    iteration: usize,
}

impl Population {
    /// Create a new population from antibodies.
    pub fn new(antibodies: Vec<Antibody>) -> Self {
        Self {
            antibodies,
            iteration: 0,
        }
    }

    /// Create `size` random antibodies, drawing each length from `lengths`.
    pub fn random<R: Rng + ?Sized>(
        alphabet: SequenceAlphabet,
        size: usize,
        lengths: SizeSpec,
        rng: &mut R,
    ) -> Self {
        let antibodies = (0..size)
            .map(|_| {
                let len = lengths.sample(rng);
                Antibody::random(alphabet, len, rng)
            })
            .collect();
        Self::new(antibodies)
    }

    /// Get the number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Increment the iteration counter.
    pub fn increment_iteration(&mut self) {
        self.iteration += 1;
    }

    /// Get the number of antibodies in the population.
    pub fn size(&self) -> usize {
        self.antibodies.len()
    }

    /// Check if population is empty.
    pub fn is_empty(&self) -> bool {
        self.antibodies.is_empty()
    }

    /// Get all antibodies as a slice.
    pub fn antibodies(&self) -> &[Antibody] {
        &self.antibodies
    }

    /// Get mutable access to antibodies.
    pub fn antibodies_mut(&mut self) -> &mut [Antibody] {
        &mut self.antibodies
    }

    /// Replace the entire population with new antibodies.
    pub fn set_antibodies(&mut self, antibodies: Vec<Antibody>) {
        self.antibodies = antibodies;
    }

    /// Get a specific antibody by index.
    pub fn get(&self, index: usize) -> Option<&Antibody> {
        self.antibodies.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Sequence;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::str::FromStr;

    #[test]
    fn test_population_new() {
        let pop = Population::new(vec![
            Antibody::new(Sequence::from_str("AC").unwrap()),
            Antibody::new(Sequence::from_str("GT").unwrap()),
        ]);
        assert_eq!(pop.size(), 2);
        assert!(!pop.is_empty());
        assert_eq!(pop.iteration(), 0);
        assert_eq!(pop.get(1).unwrap().sequence().to_string(), "GT");
        assert!(pop.get(2).is_none());
    }

    #[test]
    fn test_random_population_lengths() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let pop = Population::random(
            SequenceAlphabet::Dna,
            50,
            SizeSpec::Range { min: 3, max: 6 },
            &mut rng,
        );
        assert_eq!(pop.size(), 50);
        assert!(pop.antibodies().iter().all(|a| (3..=6).contains(&a.len())));
        assert!(pop.antibodies().iter().all(|a| a.affinity().is_nan()));
    }

    #[test]
    fn test_set_antibodies_and_iteration() {
        let mut pop = Population::default();
        assert!(pop.is_empty());
        pop.set_antibodies(vec![Antibody::new(Sequence::from_str("A").unwrap())]);
        pop.increment_iteration();
        assert_eq!(pop.size(), 1);
        assert_eq!(pop.iteration(), 1);
    }
}
