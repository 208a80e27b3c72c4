//! Commonly used imports for convenience.
//!
//! This prelude module provides a convenient way to import the most commonly
//! used types and traits in the clonalg library.
//!
//! # Example
//!
//! ```
//! use clonalg_sim::prelude::*;
//! use std::str::FromStr;
//!
//! let seq = Sequence::from_str("ACGT").unwrap();
//! assert!(seq.validate(SequenceAlphabet::Dna).is_ok());
//! ```

pub use crate::affinity::{
    AffinityModel, AffinityStrategy, Direction, EuclideanDistance, HammingSimilarity,
};
pub use crate::base::{Sequence, SequenceAlphabet};
pub use crate::errors::{self, ClonalgError, ConfigError, InputError};
pub use crate::profile::{ProfileConfig, ProfileModel, ScoringMode, ZeroPolicy};
pub use crate::simulation::{
    Antibody, Antigen, ClonalSelection, ClonalSelectionBuilder, Configuration, MemoryRecord,
    MemorySet, RunOutcome, RunStatistics, SizeSpec, WindowPlacement,
};
