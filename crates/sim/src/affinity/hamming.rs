use rand::Rng;

use super::{antigen_window, AffinityStrategy, Direction};
use crate::errors::InputError;
use crate::simulation::Antigen;

/// Fraction of positions at which candidate and antigen agree.
///
/// Sequences of different lengths, and empty sequences, have similarity 0.
/// Cloning is proportional to the similarity and mutation to its complement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HammingSimilarity;

impl HammingSimilarity {
    /// Similarity between two raw sequences.
    ///
    /// ```rust
    /// # use clonalg_sim::affinity::HammingSimilarity;
    /// let s = HammingSimilarity::similarity(b"ACG", b"ACT");
    /// assert!((s - 2.0 / 3.0).abs() < 1e-12);
    /// ```
    pub fn similarity(a: &[u8], b: &[u8]) -> f64 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }
        let same = a.iter().zip(b).filter(|(x, y)| x == y).count();
        same as f64 / a.len() as f64
    }
}

impl AffinityStrategy for HammingSimilarity {
    #[inline]
    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    #[inline]
    fn sequence_size(&self, antigen: &Antigen) -> usize {
        antigen.len()
    }

    fn calculate(
        &self,
        candidate: &[u8],
        antigen: &Antigen,
        offset: usize,
    ) -> Result<f64, InputError> {
        let window = antigen_window(antigen, offset, candidate.len())?;
        Ok(Self::similarity(candidate, window))
    }

    #[inline]
    fn clone_rate<R: Rng + ?Sized>(&self, affinity: f64, _len: usize, _rng: &mut R) -> f64 {
        affinity
    }

    #[inline]
    fn mutation_rate<R: Rng + ?Sized>(&self, affinity: f64, _len: usize, _rng: &mut R) -> f64 {
        1.0 - affinity
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
    fn test_similarity_two_thirds() {
        let s = HammingSimilarity::similarity(b"ACG", b"ACT");
        assert!((s - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_degenerate_inputs() {
        assert_eq!(HammingSimilarity::similarity(b"ACG", b"AC"), 0.0);
        assert_eq!(HammingSimilarity::similarity(b"", b""), 0.0);
        assert_eq!(HammingSimilarity::similarity(b"ACGT", b"ACGT"), 1.0);
    }

    #[test]
    fn test_calculate_uses_window() {
        let antigen = Antigen::new("a", "", Sequence::from_str("TTACGTT").unwrap());
        let h = HammingSimilarity;
        assert_eq!(h.sequence_size(&antigen), 7);
        assert_eq!(h.calculate(b"ACG", &antigen, 2).unwrap(), 1.0);
        assert_eq!(h.calculate(b"ACG", &antigen, 0).unwrap(), 0.0);
        assert!(h.calculate(b"ACG", &antigen, 5).is_err());
    }

    #[test]
    fn test_rates() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let h = HammingSimilarity;
        assert_eq!(h.clone_rate(0.75, 4, &mut rng), 0.75);
        assert_eq!(h.mutation_rate(0.75, 4, &mut rng), 0.25);
    }
}
