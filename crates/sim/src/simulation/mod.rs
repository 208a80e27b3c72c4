//! Clonal selection engine and the values it works on.
//!
//! Re-exports
//!
//! The most commonly used types are re-exported here so consumers can import
//! them from `clonalg_sim::simulation`.
//!
//! - `ClonalSelection`: the engine that runs iterations and orchestrates
//!   selection, cloning, hypermutation and replacement.
//! - `ClonalSelectionBuilder`: fluent builder with defaults and validation.
//! - `Antigen`, `Antibody`, `Population`, `MemorySet`: the data the engine
//!   reads and evolves.

pub mod antibody;
pub mod antigen;
pub mod builder;
pub mod configs;
pub mod engine;
pub mod memory;
pub mod population;
pub mod statistics;

pub use antibody::Antibody;
pub use antigen::Antigen;
pub use builder::ClonalSelectionBuilder;
pub use configs::{
    Configuration, ExecutionConfig, PopulationConfig, SelectionConfig, SizeSpec, WindowPlacement,
};
pub use engine::{ClonalSelection, RunOutcome};
pub use memory::{MemoryRecord, MemorySet};
pub use population::Population;
pub use statistics::RunStatistics;
