use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::alphabet::{is_gap, SequenceAlphabet};
use crate::errors::{InvalidSequence, OutOfBounds};

/// Mutable symbol sequence backed by a vector of uppercase ASCII bytes.
///
/// A `Sequence` may hold gap placeholders (see [`is_gap`]); they count toward
/// [`len`](Self::len) but not toward [`effective_len`](Self::effective_len).
/// Cloning always copies the buffer, so two sequences never share storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Sequence(Vec<u8>);

impl Sequence {
    /// Create a new, empty `Sequence`.
    ///
    /// ```rust
    /// # use clonalg_sim::base::Sequence;
    /// let seq = Sequence::new();
    /// assert_eq!(seq.len(), 0);
    /// ```
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a `Sequence` from raw bytes without validation.
    ///
    /// Bytes are uppercased; the caller is responsible for the symbols
    /// belonging to the alphabet it scores against.
    pub fn from_bytes(mut bytes: Vec<u8>) -> Self {
        bytes.make_ascii_uppercase();
        Self(bytes)
    }

    /// Parse `text` and check every symbol against `alphabet`.
    ///
    /// ```rust
    /// # use clonalg_sim::base::{Sequence, SequenceAlphabet};
    /// let seq = Sequence::parse("ac-gu", SequenceAlphabet::Rna).unwrap();
    /// assert_eq!(seq.to_string(), "AC-GU");
    /// assert!(Sequence::parse("ACGU", SequenceAlphabet::Dna).is_err());
    /// ```
    pub fn parse(text: &str, alphabet: SequenceAlphabet) -> Result<Self, InvalidSequence> {
        let seq = Self::from_str(text)?;
        seq.validate(alphabet)?;
        Ok(seq)
    }

    /// Draw a gap-free sequence of `len` symbols uniformly from `alphabet`.
    pub fn random<R: Rng + ?Sized>(alphabet: SequenceAlphabet, len: usize, rng: &mut R) -> Self {
        Self((0..len).map(|_| alphabet.random_symbol(rng)).collect())
    }

    /// Check every non-gap symbol against `alphabet`.
    pub fn validate(&self, alphabet: SequenceAlphabet) -> Result<(), InvalidSequence> {
        self.0
            .iter()
            .try_for_each(|&b| alphabet.check(b))
            .map_err(InvalidSequence::from)
    }

    /// Return the length of the sequence, gaps included.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if the sequence contains no symbols.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of non-gap symbols.
    #[inline]
    pub fn effective_len(&self) -> usize {
        self.0.iter().filter(|&&b| !is_gap(b)).count()
    }

    /// Return the symbol at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Set the symbol at `index`.
    ///
    /// Returns `OutOfBounds` if `index` is not smaller than the length.
    #[inline]
    pub fn set(&mut self, index: usize, symbol: u8) -> Result<(), OutOfBounds> {
        let len = self.len();
        self.0
            .get_mut(index)
            .map(|slot| *slot = symbol)
            .ok_or(OutOfBounds { index, len })
    }

    /// Borrow the underlying bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Borrow the underlying bytes mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }

    /// Consume the sequence and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Construction keeps the buffer ASCII.
        f.write_str(std::str::from_utf8(&self.0).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Sequence {
    type Err = InvalidSequence;

    /// Parse text into a `Sequence`.
    ///
    /// Accepts ASCII letters (uppercased) and the gap placeholders; anything
    /// else is an `InvalidChar` error. No alphabet check is made, use
    /// [`Sequence::parse`] for that.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data: Result<Vec<u8>, _> = s
            .chars()
            .map(|c| {
                if c.is_ascii_alphabetic() || (c.is_ascii() && is_gap(c as u8)) {
                    Ok((c as u8).to_ascii_uppercase())
                } else {
                    Err(InvalidSequence::InvalidChar(c))
                }
            })
            .collect();

        Ok(Self(data?))
    }
}

impl From<Sequence> for String {
    fn from(seq: Sequence) -> Self {
        seq.to_string()
    }
}

impl TryFrom<String> for Sequence {
    type Error = InvalidSequence;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s)
    }
}
