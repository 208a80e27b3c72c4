//! # Simulation Crate
//!
//! The `clonalg-sim` crate provides the core logic for profile-guided clonal
//! selection. It includes modules for alphabets and sequences, profile model
//! training and scoring, affinity strategies, the clonal selection operators
//! (cloning, hypermutation, selection) and the engine that runs them.

pub mod affinity;
pub mod analysis;
pub mod base;
pub mod errors;
pub mod evolution;
pub mod prelude;
pub mod profile;
pub mod simulation;

pub use base::{Sequence, SequenceAlphabet};
