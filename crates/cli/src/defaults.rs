//! Shared default values for run configuration.
//! These values are used by both the `init` and `run` commands.

pub const OUTPUT_DIR: &str = "results";
pub const CONFIG_FILE: &str = "clonalg.json";

// Length sweep over one alignment
pub const SINGLE_ITERATIONS: usize = 1000;
pub const SINGLE_PERCENT_HIGH: f64 = 0.8;
pub const SINGLE_PERCENT_LOW: f64 = 0.2;

// One run per alignment group
pub const GROUPS_ITERATIONS: usize = 10_000;
pub const GROUPS_PERCENT_HIGH: f64 = 0.9;
pub const GROUPS_PERCENT_LOW: f64 = 0.1;

pub const MIN_POPULATION: usize = 1;
pub const MAX_POPULATION: usize = 100;

pub const MIN_ANTIBODY_LENGTH: usize = 4;
pub const MAX_ANTIBODY_LENGTH: usize = 500;

/// Motifs `evaluate` looks for when no pattern list is given.
pub const EXPECTED_PATTERNS: [&str; 11] = [
    "TAAA", "ATG", "TTT", "TCT", "GAT", "TGG", "ACT", "ATTTTG", "ATA", "CGCT", "CAA",
];
