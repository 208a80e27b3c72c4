use std::fmt;
use std::ops::Range;

use crate::base::SequenceAlphabet;

/// Role of a profile position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    /// Every sequence holds a residue in the column.
    Match,
    /// Gapped columns where gaps are at least the threshold fraction.
    Insert,
    /// Columns with a minority of gaps. Delete states emit nothing.
    Delete,
}

impl StateKind {
    /// One-letter code used in profile listings.
    pub const fn code(self) -> char {
        match self {
            Self::Match => 'M',
            Self::Insert => 'I',
            Self::Delete => 'D',
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Match => "Match",
            Self::Insert => "Insert",
            Self::Delete => "Delete",
        };
        f.write_str(name)
    }
}

/// Outgoing transition probabilities of a state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transitions {
    pub to_match: f64,
    pub to_insert: f64,
    pub to_delete: f64,
}

impl Transitions {
    /// Deterministic step to the next Match state.
    pub const MATCH: Self = Self {
        to_match: 1.0,
        to_insert: 0.0,
        to_delete: 0.0,
    };

    /// All-zero marker carried by Delete states.
    pub const NONE: Self = Self {
        to_match: 0.0,
        to_insert: 0.0,
        to_delete: 0.0,
    };

    /// Largest of the three probabilities.
    #[inline]
    pub fn max(&self) -> f64 {
        self.to_match.max(self.to_insert).max(self.to_delete)
    }
}

/// One trained profile position.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub(crate) kind: StateKind,
    pub(crate) emissions: Vec<f64>,
    pub(crate) transitions: Transitions,
    pub(crate) columns: Range<usize>,
}

impl ProfileState {
    #[inline]
    pub fn kind(&self) -> StateKind {
        self.kind
    }

    /// Emission probabilities indexed like the alphabet's symbols.
    #[inline]
    pub fn emissions(&self) -> &[f64] {
        &self.emissions
    }

    #[inline]
    pub fn transitions(&self) -> Transitions {
        self.transitions
    }

    /// Alignment columns this state was trained from.
    #[inline]
    pub fn columns(&self) -> Range<usize> {
        self.columns.clone()
    }

    /// Most probable symbol, or `None` for states without emissions.
    ///
    /// Ties go to the symbol that comes first in the alphabet.
    pub fn consensus(&self, alphabet: SequenceAlphabet) -> Option<u8> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in self.emissions.iter().enumerate() {
            if p > 0.0 && best.map_or(true, |(_, q)| p > q) {
                best = Some((i, p));
            }
        }
        best.and_then(|(i, _)| alphabet.symbol(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_max() {
        assert_eq!(Transitions::MATCH.max(), 1.0);
        assert_eq!(Transitions::NONE.max(), 0.0);
        let t = Transitions {
            to_match: 0.3,
            to_insert: 0.7,
            to_delete: 0.0,
        };
        assert_eq!(t.max(), 0.7);
    }

    #[test]
    fn test_consensus() {
        let state = ProfileState {
            kind: StateKind::Match,
            emissions: vec![0.25, 0.5, 0.25, 0.0],
            transitions: Transitions::MATCH,
            columns: 0..1,
        };
        assert_eq!(state.consensus(SequenceAlphabet::Dna), Some(b'C'));

        let tie = ProfileState {
            emissions: vec![0.0, 0.5, 0.5, 0.0],
            ..state.clone()
        };
        assert_eq!(tie.consensus(SequenceAlphabet::Dna), Some(b'C'));

        let silent = ProfileState {
            kind: StateKind::Delete,
            emissions: vec![0.0; 4],
            transitions: Transitions::NONE,
            columns: 3..4,
        };
        assert_eq!(silent.consensus(SequenceAlphabet::Dna), None);
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(StateKind::Match.code(), 'M');
        assert_eq!(StateKind::Insert.to_string(), "Insert");
    }
}
