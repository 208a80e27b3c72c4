//! Affinity-driven point mutation ("hypermutation").
//!
//! A clone receives `floor(rate * len)` point mutations, where the rate comes
//! from the affinity strategy. Each mutation picks a position uniformly within
//! the effective length (positions may repeat) and overwrites it with a symbol
//! drawn uniformly from the alphabet, which may equal the old one.

use rand::Rng;

use crate::base::{Sequence, SequenceAlphabet};

/// Number of point mutations for a mutation `rate` over `len` symbols.
///
/// Non-finite and non-positive rates give no mutations.
///
/// ```rust
/// # use clonalg_sim::evolution::mutation_count;
/// assert_eq!(mutation_count(0.5, 9), 4);
/// assert_eq!(mutation_count(f64::NAN, 9), 0);
/// ```
#[inline]
pub fn mutation_count(rate: f64, len: usize) -> usize {
    if !rate.is_finite() || rate <= 0.0 {
        return 0;
    }
    (rate * len as f64).floor() as usize
}

/// Point mutation operator over a fixed alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hypermutation {
    alphabet: SequenceAlphabet,
}

impl Hypermutation {
    pub fn new(alphabet: SequenceAlphabet) -> Self {
        Self { alphabet }
    }

    #[inline]
    pub fn alphabet(&self) -> SequenceAlphabet {
        self.alphabet
    }

    /// Apply `count` point mutations to `sequence` in place.
    ///
    /// Returns the number of mutation events applied, which is `count`
    /// unless the sequence has no effective symbols.
    pub fn mutate<R: Rng + ?Sized>(
        &self,
        sequence: &mut Sequence,
        count: usize,
        rng: &mut R,
    ) -> usize {
        let span = sequence.effective_len();
        if span == 0 {
            return 0;
        }

        let symbols = sequence.as_mut_slice();
        for _ in 0..count {
            let pos = rng.random_range(0..span);
            symbols[pos] = self.alphabet.random_symbol(rng);
        }
        count
    }
}
