//! Evolution operators for the clonal selection loop.
//!
//! - **Selection**: keep the best antibodies, drop the worst
//! - **Cloning**: copies proportional to the clone rate
//! - **Mutation**: point mutations proportional to the mutation rate

pub mod cloning;
pub mod mutation;
pub mod selection;

pub use cloning::{clone_count, clones};
pub use mutation::{mutation_count, Hypermutation};
pub use selection::{fraction_count, remove_worst, select_best};
