//! Pattern recovery evaluation
//!
//! Compares the sequences held in memory cells against a list of motifs that
//! are known to be present in the input, e.g. when the alignment was
//! generated with planted patterns.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Outcome of comparing discovered sequences with expected patterns.
///
/// `found` and `missing` both keep the order of the expected list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternReport {
    pub expected: usize,
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

impl PatternReport {
    /// True when every expected pattern was discovered.
    pub fn all_found(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fraction of expected patterns discovered; 0 when nothing was expected.
    pub fn recovery(&self) -> f64 {
        if self.expected == 0 {
            0.0
        } else {
            self.found.len() as f64 / self.expected as f64
        }
    }
}

/// Check which `expected` patterns appear verbatim among `discovered`.
///
/// Matching is exact and case-sensitive. Duplicate expected patterns are
/// counted once.
///
/// # Examples
///
/// ```
/// use clonalg_sim::analysis::evaluate_patterns;
///
/// let report = evaluate_patterns(["TAAA", "CCGT"], &["TAAA", "ATG"]);
/// assert_eq!(report.found, vec!["TAAA"]);
/// assert_eq!(report.missing, vec!["ATG"]);
/// assert!(!report.all_found());
/// ```
pub fn evaluate_patterns<I, S, E>(discovered: I, expected: &[E]) -> PatternReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    E: AsRef<str>,
{
    let discovered: HashSet<String> = discovered
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();

    let mut seen = HashSet::new();
    let mut report = PatternReport::default();
    for pattern in expected {
        let pattern: &str = pattern.as_ref();
        if !seen.insert(pattern) {
            continue;
        }
        report.expected += 1;
        if discovered.contains(pattern) {
            report.found.push(pattern.to_string());
        } else {
            report.missing.push(pattern.to_string());
        }
    }
    report
}

/// Join fragments position-wise across groups.
///
/// Fragment `j` of the result is the concatenation of fragment `j` of every
/// group that has one, in group order. Used when one alignment was split into
/// consecutive column groups and each group produced its own memory cells.
pub fn join_fragments<S: AsRef<str>>(groups: &[Vec<S>]) -> Vec<String> {
    let mut joined: Vec<String> = Vec::new();
    for group in groups {
        for (j, fragment) in group.iter().enumerate() {
            match joined.get_mut(j) {
                Some(existing) => existing.push_str(fragment.as_ref()),
                None => joined.push(fragment.as_ref().to_string()),
            }
        }
    }
    joined
}
