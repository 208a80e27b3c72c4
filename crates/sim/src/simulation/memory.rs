//! Memory cells: the best antibody found per antigen.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::affinity::AffinityStrategy;
use crate::simulation::Antibody;

/// Exported view of one memory cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub antigen: String,
    pub sequence: String,
    pub affinity: f64,
}

/// At most one antibody per antigen, iterated in the order antigens were
/// first inserted.
///
/// An entry is only ever replaced by a strictly better antibody, so its
/// affinity never gets worse over a run.
#[derive(Debug, Clone, Default)]
pub struct MemorySet {
    cells: Vec<(Arc<str>, Antibody)>,
    index: HashMap<Arc<str>, usize>,
}

impl MemorySet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Memory cell for `antigen`.
    pub fn get(&self, antigen: &str) -> Option<&Antibody> {
        self.index.get(antigen).map(|&i| &self.cells[i].1)
    }

    /// Offer `candidate` as the memory cell for `antigen`.
    ///
    /// The candidate is stored if the antigen has no cell yet, or replaces the
    /// current cell when `strategy` ranks it strictly better. Returns true if
    /// the memory changed.
    pub fn insert<S: AffinityStrategy>(
        &mut self,
        strategy: &S,
        antigen: Arc<str>,
        mut candidate: Antibody,
    ) -> bool {
        candidate.bind(Arc::clone(&antigen));
        match self.index.get(&antigen).copied() {
            Some(i) => {
                let cell = &mut self.cells[i].1;
                if strategy.is_better(candidate.affinity(), cell.affinity()) {
                    *cell = candidate;
                    true
                } else {
                    false
                }
            }
            None => {
                self.index.insert(Arc::clone(&antigen), self.cells.len());
                self.cells.push((antigen, candidate));
                true
            }
        }
    }

    /// Iterate `(antigen, antibody)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Antibody)> {
        self.cells.iter().map(|(name, ab)| (&**name, ab))
    }

    /// Affinities in insertion order.
    pub fn affinities(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().map(|(_, ab)| ab.affinity())
    }

    /// Serializable snapshot in insertion order.
    pub fn records(&self) -> Vec<MemoryRecord> {
        self.iter()
            .map(|(antigen, ab)| MemoryRecord {
                antigen: antigen.to_string(),
                sequence: ab.sequence().to_string(),
                affinity: ab.affinity(),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
    }
}
