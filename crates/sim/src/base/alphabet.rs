use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidSymbol;

/// Placeholder symbols that mark "no residue at this alignment column".
pub const GAPS: [u8; 4] = [b'.', b'-', b'x', b'X'];

const DNA: [u8; 4] = [b'A', b'C', b'G', b'T'];
const RNA: [u8; 4] = [b'A', b'C', b'G', b'U'];
const PROTEIN: [u8; 20] = [
    b'A', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'K', b'L', b'M', b'N', b'P', b'Q', b'R', b'S',
    b'T', b'V', b'W', b'Y',
];

/// Returns true if `byte` is one of the gap placeholders.
#[inline(always)]
pub const fn is_gap(byte: u8) -> bool {
    matches!(byte, b'.' | b'-' | b'x' | b'X')
}

/// The finite symbol set a run works over.
///
/// `SequenceAlphabet` is a plain value: it is passed into the profile model
/// and the search engine instead of living in shared state. Symbols are
/// uppercase ASCII bytes and their index is their position in
/// [`symbols`](Self::symbols), which is also the layout of every per-symbol
/// vector in the crate (emissions, feature vectors).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceAlphabet {
    #[default]
    Dna,
    Rna,
    Protein,
}

impl SequenceAlphabet {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dna => "DNA",
            Self::Rna => "RNA",
            Self::Protein => "Protein",
        }
    }

    /// All symbols in index order.
    #[inline]
    pub const fn symbols(self) -> &'static [u8] {
        match self {
            Self::Dna => &DNA,
            Self::Rna => &RNA,
            Self::Protein => &PROTEIN,
        }
    }

    /// Number of symbols (4 for nucleic acids, 20 for protein).
    #[inline]
    pub const fn size(self) -> usize {
        self.symbols().len()
    }

    /// Index of an uppercase symbol, or `None` for gaps and foreign bytes.
    #[inline]
    pub fn index_of(self, byte: u8) -> Option<usize> {
        self.symbols().iter().position(|&s| s == byte)
    }

    /// Symbol at `index`.
    #[inline]
    pub fn symbol(self, index: usize) -> Option<u8> {
        self.symbols().get(index).copied()
    }

    /// Returns true if `byte` is a symbol of this alphabet (gaps excluded).
    #[inline]
    pub fn contains(self, byte: u8) -> bool {
        self.index_of(byte).is_some()
    }

    /// Validate a byte as either a symbol or a gap.
    pub fn check(self, byte: u8) -> Result<(), InvalidSymbol> {
        if is_gap(byte) || self.contains(byte) {
            Ok(())
        } else {
            Err(InvalidSymbol(byte, self.name()))
        }
    }

    /// Draw one symbol uniformly at random.
    #[inline]
    pub fn random_symbol<R: Rng + ?Sized>(self, rng: &mut R) -> u8 {
        let symbols = self.symbols();
        symbols[rng.random_range(0..symbols.len())]
    }

    /// Guess the alphabet of raw residues.
    ///
    /// Tries DNA, then RNA, then protein; gaps, whitespace and case are
    /// ignored. Returns `None` when no alphabet accepts every residue or when
    /// there are no residues at all.
    pub fn detect(residues: &[u8]) -> Option<Self> {
        let mut seen_residue = false;
        let mut fits = [true; 3];
        let candidates = [Self::Dna, Self::Rna, Self::Protein];

        for &b in residues {
            if b.is_ascii_whitespace() || is_gap(b) {
                continue;
            }
            seen_residue = true;
            let upper = b.to_ascii_uppercase();
            for (fit, alphabet) in fits.iter_mut().zip(candidates) {
                *fit = *fit && alphabet.contains(upper);
            }
        }

        if !seen_residue {
            return None;
        }
        candidates
            .into_iter()
            .zip(fits)
            .find_map(|(alphabet, fit)| fit.then_some(alphabet))
    }
}

impl fmt::Display for SequenceAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
