//! Selection of the best antibodies and removal of the worst.
//!
//! Both operations sort with the strategy's ordering, which is stable and
//! ranks NaN affinities last, so ties are resolved by encounter order.

use crate::affinity::AffinityStrategy;
use crate::simulation::Antibody;

/// Number of antibodies a `fraction` of `size` stands for: `round(fraction * size)`.
#[inline]
pub fn fraction_count(fraction: f64, size: usize) -> usize {
    if !fraction.is_finite() || fraction <= 0.0 {
        return 0;
    }
    (fraction * size as f64).round() as usize
}

/// Keep the `n` best antibodies, best first.
pub fn select_best<S: AffinityStrategy>(
    strategy: &S,
    antibodies: &mut Vec<Antibody>,
    n: usize,
) {
    strategy.order(antibodies);
    antibodies.truncate(n);
}

/// Remove the `n` worst antibodies and return them, worst first.
///
/// Among tied affinities the antibody encountered first is removed first.
/// The remaining antibodies are left ordered best first.
pub fn remove_worst<S: AffinityStrategy>(
    strategy: &S,
    antibodies: &mut Vec<Antibody>,
    n: usize,
) -> Vec<Antibody> {
    antibodies.sort_by(|x, y| strategy.rank(y.affinity(), x.affinity()));
    let n = n.min(antibodies.len());
    let removed: Vec<Antibody> = antibodies.drain(..n).collect();
    strategy.order(antibodies);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affinity::{AffinityModel, EuclideanDistance, HammingSimilarity};
    use crate::base::{Sequence, SequenceAlphabet};
    use std::str::FromStr;

    fn population(affinities: &[f64]) -> Vec<Antibody> {
        affinities
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                let mut ab = Antibody::new(Sequence::from_str(&"A".repeat(i + 1)).unwrap());
                ab.set_affinity(a);
                ab
            })
            .collect()
    }

    #[test]
    fn test_fraction_count() {
        assert_eq!(fraction_count(0.0, 10), 0);
        assert_eq!(fraction_count(0.25, 10), 3);
        assert_eq!(fraction_count(1.0, 10), 10);
        assert_eq!(fraction_count(0.5, 1), 1);
        assert_eq!(fraction_count(f64::NAN, 10), 0);
    }

    #[test]
    fn test_select_best_maximize() {
        let strategy = AffinityModel::from(HammingSimilarity);
        let mut pop = population(&[0.2, 0.9, f64::NAN, 0.5]);
        select_best(&strategy, &mut pop, 2);
        assert_eq!(pop.len(), 2);
        assert_eq!(pop[0].affinity(), 0.9);
        assert_eq!(pop[1].affinity(), 0.5);
    }

    #[test]
    fn test_select_best_minimize() {
        let strategy = AffinityModel::from(EuclideanDistance::new(SequenceAlphabet::Dna));
        let mut pop = population(&[0.2, 0.9, f64::NAN, 0.5]);
        select_best(&strategy, &mut pop, 3);
        let kept: Vec<f64> = pop.iter().map(|a| a.affinity()).collect();
        assert_eq!(kept, vec![0.2, 0.5, 0.9]);
    }

    #[test]
    fn test_select_more_than_available() {
        let strategy = AffinityModel::from(HammingSimilarity);
        let mut pop = population(&[0.1, 0.2]);
        select_best(&strategy, &mut pop, 10);
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_remove_worst_ties_by_encounter_order() {
        let strategy = AffinityModel::from(HammingSimilarity);
        // Lengths 1..=5 identify the antibodies.
        let mut pop = population(&[0.5, 0.1, 0.9, 0.1, f64::NAN]);
        let removed = remove_worst(&strategy, &mut pop, 2);

        let removed_lens: Vec<usize> = removed.iter().map(|a| a.len()).collect();
        assert_eq!(removed_lens, vec![5, 2]);

        let kept_lens: Vec<usize> = pop.iter().map(|a| a.len()).collect();
        assert_eq!(kept_lens, vec![3, 1, 4]);
    }

    #[test]
    fn test_remove_worst_takes_earliest_tie() {
        let strategy = AffinityModel::from(EuclideanDistance::new(SequenceAlphabet::Dna));
        let mut pop = population(&[0.7, 0.2, 0.7, 0.7]);
        let removed = remove_worst(&strategy, &mut pop, 2);

        let removed_lens: Vec<usize> = removed.iter().map(|a| a.len()).collect();
        assert_eq!(removed_lens, vec![1, 3]);

        let kept_lens: Vec<usize> = pop.iter().map(|a| a.len()).collect();
        assert_eq!(kept_lens, vec![2, 4]);
    }

    #[test]
    fn test_remove_worst_zero_and_all() {
        let strategy = AffinityModel::from(HammingSimilarity);
        let mut pop = population(&[0.5, 0.1]);
        assert!(remove_worst(&strategy, &mut pop, 0).is_empty());
        assert_eq!(pop.len(), 2);

        let removed = remove_worst(&strategy, &mut pop, 5);
        assert_eq!(removed.len(), 2);
        assert!(pop.is_empty());
    }
}
