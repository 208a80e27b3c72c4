//! Base types for sequence representation.
//!
//! This module provides the symbol alphabets and the owned, mutable
//! `Sequence` buffer that every other part of the crate works with.

mod alphabet;
mod sequence;

pub use alphabet::{is_gap, SequenceAlphabet, GAPS};
pub use sequence::Sequence;
