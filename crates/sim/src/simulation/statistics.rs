//! End-of-run summary over the memory cells.

use serde::{Deserialize, Serialize};

use crate::affinity::{compare_affinity, Direction};

/// Aggregates computed once from the memory set when a run finishes.
///
/// Mean and variance only consider finite affinities and are `None` when no
/// memory cell has one. Variance is the population variance. Best ranges over
/// every non-NaN affinity, infinities included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub mean: Option<f64>,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    /// Best non-NaN affinity in the strategy's direction.
    pub best: Option<f64>,
    pub elapsed_seconds: f64,
    pub iterations: usize,
    pub percent_high: f64,
    pub percent_low: f64,
    pub memory_entries: usize,
    pub finite_entries: usize,
    /// Per-antigen steps skipped for lack of antibodies, selection or clones.
    pub degenerate_steps: usize,
}

impl RunStatistics {
    /// Summarize `affinities`; run metadata is left at its defaults.
    pub fn summarize<I>(affinities: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut memory_entries = 0;
        let ranked: Vec<f64> = affinities
            .into_iter()
            .inspect(|_| memory_entries += 1)
            .filter(|a| !a.is_nan())
            .collect();
        let finite: Vec<f64> = ranked.iter().copied().filter(|a| a.is_finite()).collect();

        let mut stats = Self {
            memory_entries,
            finite_entries: finite.len(),
            best: ranked
                .iter()
                .copied()
                .min_by(|a, b| compare_affinity(*a, *b, direction)),
            ..Default::default()
        };
        if finite.is_empty() {
            return stats;
        }

        let n = finite.len() as f64;
        let mean = finite.iter().sum::<f64>() / n;
        let variance = finite.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n;

        stats.mean = Some(mean);
        stats.variance = Some(variance);
        stats.std_dev = Some(variance.sqrt());
        stats
    }
}
