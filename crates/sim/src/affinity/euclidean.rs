use rand::Rng;

use super::{antigen_window, AffinityStrategy, Direction};
use crate::base::SequenceAlphabet;
use crate::errors::InputError;
use crate::simulation::Antigen;

/// Distance between composition feature vectors.
///
/// A sequence of length `n` over an alphabet of size `A` maps to a vector of
/// `A*A + 2*A` values, in this order:
///
/// 1. a row-major `A x A` transition matrix, `P[i][j] = pairs(i, j) / occ(i)`,
///    dividing by `occ(i) - 1` when `i` is the final symbol (its last
///    occurrence has no successor); rows with `occ(i) <= 1` are zero;
/// 2. the content ratio `occ(i) / n`;
/// 3. the positional ratio `2 * sum(positions of i) / (n * (n + 1))`, with
///    0-based positions.
///
/// Gaps and foreign bytes take up a position but never count as a symbol.
/// An empty sequence produces NaN ratios, and so a NaN distance.
///
/// Lower distances are better. Clone and mutation rates do not depend on the
/// affinity: each is a fresh uniform draw in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EuclideanDistance {
    alphabet: SequenceAlphabet,
}

impl EuclideanDistance {
    pub fn new(alphabet: SequenceAlphabet) -> Self {
        Self { alphabet }
    }

    #[inline]
    pub fn alphabet(&self) -> SequenceAlphabet {
        self.alphabet
    }

    /// Feature vector of `seq`.
    pub fn features(&self, seq: &[u8]) -> Vec<f64> {
        let size = self.alphabet.size();
        let n = seq.len();
        let indices: Vec<Option<usize>> = seq
            .iter()
            .map(|b| self.alphabet.index_of(b.to_ascii_uppercase()))
            .collect();

        let mut occurrences = vec![0usize; size];
        let mut position_sums = vec![0usize; size];
        let mut pairs = vec![0usize; size * size];

        for (pos, index) in indices.iter().enumerate() {
            if let Some(i) = *index {
                occurrences[i] += 1;
                position_sums[i] += pos;
            }
        }
        for w in indices.windows(2) {
            if let (Some(i), Some(j)) = (w[0], w[1]) {
                pairs[i * size + j] += 1;
            }
        }
        let last = indices.last().copied().flatten();

        let mut features = Vec::with_capacity(size * size + 2 * size);
        for i in 0..size {
            let occ = occurrences[i];
            let denom = if last == Some(i) { occ.saturating_sub(1) } else { occ };
            for j in 0..size {
                features.push(if occ <= 1 {
                    0.0
                } else {
                    pairs[i * size + j] as f64 / denom as f64
                });
            }
        }

        let n_f = n as f64;
        features.extend(occurrences.iter().map(|&occ| occ as f64 / n_f));

        let triangle = n_f * (n_f + 1.0);
        features.extend(position_sums.iter().map(|&sum| 2.0 * sum as f64 / triangle));

        features
    }

    /// Euclidean distance between the feature vectors of `a` and `b`.
    pub fn distance(&self, a: &[u8], b: &[u8]) -> f64 {
        let fa = self.features(a);
        let fb = self.features(b);
        fa.iter()
            .zip(&fb)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }
}

impl AffinityStrategy for EuclideanDistance {
    #[inline]
    fn direction(&self) -> Direction {
        Direction::Minimize
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
        Ok(self.distance(candidate, window))
    }

    #[inline]
    fn clone_rate<R: Rng + ?Sized>(&self, _affinity: f64, _len: usize, rng: &mut R) -> f64 {
        rng.random::<f64>()
    }

    #[inline]
    fn mutation_rate<R: Rng + ?Sized>(&self, _affinity: f64, _len: usize, rng: &mut R) -> f64 {
        rng.random::<f64>()
    }
}
