//! Candidate sequences evolved by the search.

use std::sync::Arc;

use rand::Rng;

use crate::base::{Sequence, SequenceAlphabet};

/// A candidate pattern ("antibody").
///
/// Each antibody owns its symbol buffer; `clone` is a deep copy, so a mutated
/// clone never affects its parent. The affinity starts as NaN (unscored) and
/// its direction is defined by the active affinity strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Antibody {
    sequence: Sequence,
    affinity: f64,
    antigen: Option<Arc<str>>,
}

impl Antibody {
    /// Create an unscored antibody.
    pub fn new(sequence: Sequence) -> Self {
        Self {
            sequence,
            affinity: f64::NAN,
            antigen: None,
        }
    }

    /// Create an unscored antibody of `len` uniformly drawn symbols.
    pub fn random<R: Rng + ?Sized>(alphabet: SequenceAlphabet, len: usize, rng: &mut R) -> Self {
        Self::new(Sequence::random(alphabet, len, rng))
    }

    #[inline]
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    #[inline]
    pub fn sequence_mut(&mut self) -> &mut Sequence {
        &mut self.sequence
    }

    /// Length including gaps.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Number of non-gap symbols.
    #[inline]
    pub fn effective_len(&self) -> usize {
        self.sequence.effective_len()
    }

    /// Last computed affinity (NaN when never scored).
    #[inline]
    pub fn affinity(&self) -> f64 {
        self.affinity
    }

    #[inline]
    pub fn set_affinity(&mut self, affinity: f64) {
        self.affinity = affinity;
    }

    /// Name of the antigen this antibody was last scored against.
    #[inline]
    pub fn antigen(&self) -> Option<&str> {
        self.antigen.as_deref()
    }

    /// Record the antigen this antibody was scored against.
    #[inline]
    pub fn bind(&mut self, antigen: Arc<str>) {
        self.antigen = Some(antigen);
    }
}
