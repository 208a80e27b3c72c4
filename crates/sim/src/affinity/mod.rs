//! Affinity strategies: how a candidate is scored against an antigen.
//!
//! The search engine only sees the [`AffinityStrategy`] surface. The closed
//! set of strategies lives in [`AffinityModel`]:
//!
//! - **Profile**: likelihood under a profile model trained from an alignment
//!   (higher is better).
//! - **Euclidean**: distance between composition feature vectors (lower is
//!   better).
//! - **Hamming**: fraction of identical positions (higher is better).
//!
//! Every comparison goes through [`compare_affinity`], which ranks NaN after
//! every other value regardless of direction.

mod euclidean;
mod hamming;

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::base::SequenceAlphabet;
use crate::errors::InputError;
use crate::profile::ProfileModel;
use crate::simulation::{Antibody, Antigen};

pub use euclidean::EuclideanDistance;
pub use hamming::HammingSimilarity;

/// Which way affinities improve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Larger affinities are better.
    Maximize,
    /// Smaller affinities are better.
    Minimize,
}

/// Rank two affinities: `Less` means `a` is better than `b`.
///
/// NaN is never better than anything and anything non-NaN (infinities
/// included) is better than NaN. Two NaNs compare equal.
///
/// ```rust
/// # use clonalg_sim::affinity::{compare_affinity, Direction};
/// # use std::cmp::Ordering;
/// assert_eq!(compare_affinity(0.9, 0.1, Direction::Maximize), Ordering::Less);
/// assert_eq!(compare_affinity(0.9, 0.1, Direction::Minimize), Ordering::Greater);
/// assert_eq!(compare_affinity(f64::NAN, 0.1, Direction::Maximize), Ordering::Greater);
/// ```
#[inline]
pub fn compare_affinity(a: f64, b: f64, direction: Direction) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            Direction::Maximize => b.partial_cmp(&a),
            Direction::Minimize => a.partial_cmp(&b),
        }
        .unwrap_or(Ordering::Equal),
    }
}

/// The capability surface the clonal selection engine depends on.
///
/// Rate methods take the engine's RNG because some strategies draw their
/// rates at random rather than deriving them from the affinity.
pub trait AffinityStrategy {
    /// Whether larger or smaller affinities are better.
    fn direction(&self) -> Direction;

    /// Length a candidate is scored against for `antigen`.
    ///
    /// Candidates longer than this cannot be scored; shorter candidates are
    /// scored against a window starting at some offset in
    /// `0..=sequence_size - len`.
    fn sequence_size(&self, antigen: &Antigen) -> usize;

    /// Affinity of `candidate` against `antigen`, using the window that
    /// starts at `offset`.
    fn calculate(&self, candidate: &[u8], antigen: &Antigen, offset: usize)
        -> Result<f64, InputError>;

    /// Fraction of `len` used as the clone count for a candidate.
    fn clone_rate<R: Rng + ?Sized>(&self, affinity: f64, len: usize, rng: &mut R) -> f64;

    /// Fraction of `len` used as the point-mutation count for a clone.
    fn mutation_rate<R: Rng + ?Sized>(&self, affinity: f64, len: usize, rng: &mut R) -> f64;

    /// Returns true if `a` is strictly better than `b`.
    #[inline]
    fn is_better(&self, a: f64, b: f64) -> bool {
        compare_affinity(a, b, self.direction()) == Ordering::Less
    }

    /// Total order over affinities, best first.
    #[inline]
    fn rank(&self, a: f64, b: f64) -> Ordering {
        compare_affinity(a, b, self.direction())
    }

    /// Sort antibodies best first. The sort is stable, so ties keep their
    /// encounter order.
    fn order(&self, antibodies: &mut [Antibody]) {
        antibodies.sort_by(|x, y| self.rank(x.affinity(), y.affinity()));
    }
}

/// The closed set of affinity strategies.
#[derive(Debug, Clone)]
pub enum AffinityModel {
    Profile(ProfileModel),
    Euclidean(EuclideanDistance),
    Hamming(HammingSimilarity),
}

impl AffinityModel {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Profile(_) => "profile",
            Self::Euclidean(_) => "euclidean",
            Self::Hamming(_) => "hamming",
        }
    }

    /// Alphabet the strategy was built for; Hamming works over any.
    pub fn alphabet(&self) -> Option<SequenceAlphabet> {
        match self {
            Self::Profile(m) => Some(m.alphabet()),
            Self::Euclidean(m) => Some(m.alphabet()),
            Self::Hamming(_) => None,
        }
    }
}

impl From<ProfileModel> for AffinityModel {
    fn from(model: ProfileModel) -> Self {
        Self::Profile(model)
    }
}

impl From<EuclideanDistance> for AffinityModel {
    fn from(model: EuclideanDistance) -> Self {
        Self::Euclidean(model)
    }
}

impl From<HammingSimilarity> for AffinityModel {
    fn from(model: HammingSimilarity) -> Self {
        Self::Hamming(model)
    }
}

impl AffinityStrategy for AffinityModel {
    fn direction(&self) -> Direction {
        match self {
            Self::Profile(m) => m.direction(),
            Self::Euclidean(m) => m.direction(),
            Self::Hamming(m) => m.direction(),
        }
    }

    fn sequence_size(&self, antigen: &Antigen) -> usize {
        match self {
            Self::Profile(m) => m.sequence_size(antigen),
            Self::Euclidean(m) => m.sequence_size(antigen),
            Self::Hamming(m) => m.sequence_size(antigen),
        }
    }

    fn calculate(
        &self,
        candidate: &[u8],
        antigen: &Antigen,
        offset: usize,
    ) -> Result<f64, InputError> {
        match self {
            Self::Profile(m) => m.calculate(candidate, antigen, offset),
            Self::Euclidean(m) => m.calculate(candidate, antigen, offset),
            Self::Hamming(m) => m.calculate(candidate, antigen, offset),
        }
    }

    fn clone_rate<R: Rng + ?Sized>(&self, affinity: f64, len: usize, rng: &mut R) -> f64 {
        match self {
            Self::Profile(m) => m.clone_rate(affinity, len, rng),
            Self::Euclidean(m) => m.clone_rate(affinity, len, rng),
            Self::Hamming(m) => m.clone_rate(affinity, len, rng),
        }
    }

    fn mutation_rate<R: Rng + ?Sized>(&self, affinity: f64, len: usize, rng: &mut R) -> f64 {
        match self {
            Self::Profile(m) => m.mutation_rate(affinity, len, rng),
            Self::Euclidean(m) => m.mutation_rate(affinity, len, rng),
            Self::Hamming(m) => m.mutation_rate(affinity, len, rng),
        }
    }
}

/// Slice `antigen` to the window a candidate of `len` symbols is compared
/// against.
pub(crate) fn antigen_window(antigen: &Antigen, offset: usize, len: usize) -> Result<&[u8], InputError> {
    let bytes = antigen.sequence().as_slice();
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or(InputError::LengthMismatch {
            len,
            offset,
            states: bytes.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Sequence;
    use std::str::FromStr;

    fn scored(affinities: &[f64]) -> Vec<Antibody> {
        affinities
            .iter()
            .map(|&a| {
                let mut ab = Antibody::new(Sequence::from_str("A").unwrap());
                ab.set_affinity(a);
                ab
            })
            .collect()
    }

    #[test]
    fn test_nan_is_never_better() {
        for direction in [Direction::Maximize, Direction::Minimize] {
            assert_eq!(compare_affinity(f64::NAN, 1.0, direction), Ordering::Greater);
            assert_eq!(compare_affinity(1.0, f64::NAN, direction), Ordering::Less);
            assert_eq!(
                compare_affinity(f64::NEG_INFINITY, f64::NAN, direction),
                Ordering::Less
            );
            assert_eq!(compare_affinity(f64::NAN, f64::NAN, direction), Ordering::Equal);
        }
    }

    #[test]
    fn test_is_better_follows_direction() {
        let hamming = AffinityModel::from(HammingSimilarity);
        assert!(hamming.is_better(0.8, 0.2));
        assert!(!hamming.is_better(0.2, 0.8));
        assert!(!hamming.is_better(0.5, 0.5));
        assert!(!hamming.is_better(f64::NAN, 0.0));

        let euclid = AffinityModel::from(EuclideanDistance::new(SequenceAlphabet::Dna));
        assert!(euclid.is_better(0.2, 0.8));
        assert!(euclid.is_better(0.2, f64::NAN));
    }

    #[test]
    fn test_order_puts_nan_last_and_is_stable() {
        let model = AffinityModel::from(HammingSimilarity);
        let mut antibodies = scored(&[0.5, f64::NAN, 0.9, 0.5, 0.1]);
        antibodies[0].bind("first".into());
        antibodies[3].bind("second".into());
        model.order(&mut antibodies);

        let order: Vec<f64> = antibodies.iter().map(|a| a.affinity()).collect();
        assert_eq!(&order[..4], &[0.9, 0.5, 0.5, 0.1]);
        assert!(order[4].is_nan());
        assert_eq!(antibodies[1].antigen(), Some("first"));
        assert_eq!(antibodies[2].antigen(), Some("second"));
    }

    #[test]
    fn test_order_minimize() {
        let model = AffinityModel::from(EuclideanDistance::new(SequenceAlphabet::Dna));
        let mut antibodies = scored(&[f64::NAN, 3.0, 1.0, f64::INFINITY]);
        model.order(&mut antibodies);
        let order: Vec<f64> = antibodies.iter().map(|a| a.affinity()).collect();
        assert_eq!(&order[..3], &[1.0, 3.0, f64::INFINITY]);
        assert!(order[3].is_nan());
    }

    #[test]
    fn test_antigen_window() {
        let antigen = Antigen::new("a", "", Sequence::from_str("ACGTA").unwrap());
        assert_eq!(antigen_window(&antigen, 1, 3).unwrap(), b"CGT");
        assert!(antigen_window(&antigen, 3, 3).is_err());
        assert!(antigen_window(&antigen, usize::MAX, 2).is_err());
    }
}
