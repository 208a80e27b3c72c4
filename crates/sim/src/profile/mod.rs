//! Profile model: a per-column probabilistic model of an alignment.
//!
//! Training turns every alignment column into a Match, Delete or Insert
//! position with its own emission and transition probabilities. The trained
//! model scores new sequences and serves as the profile affinity strategy.

mod config;
mod model;
mod state;

pub use config::{ProfileConfig, ScoringMode, ZeroPolicy};
pub use model::ProfileModel;
pub use state::{ProfileState, StateKind, Transitions};
