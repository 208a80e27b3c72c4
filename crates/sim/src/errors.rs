use std::fmt;

use thiserror::Error;

/// Error returned when a byte is neither a symbol of the active alphabet nor
/// a gap. Carries the offending byte and the alphabet name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSymbol(pub u8, pub &'static str);

impl fmt::Display for InvalidSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid symbol byte: {} ('{}') for {} alphabet",
            self.0, self.0 as char, self.1
        )
    }
}

impl std::error::Error for InvalidSymbol {}

/// Error type for failures when constructing a `Sequence`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSequence {
    /// A character was not an ASCII letter or a gap symbol.
    #[error("Invalid character in sequence: '{0}'")]
    InvalidChar(char),

    /// A symbol does not belong to the requested alphabet.
    #[error(transparent)]
    InvalidSymbol(#[from] InvalidSymbol),
}

/// Error returned when an index is outside the valid range for a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Index {index} out of bounds (len = {len})")]
pub struct OutOfBounds {
    /// The index that was requested
    pub index: usize,

    /// The current length of the sequence (upper bound)
    pub len: usize,
}

/// Invalid data handed to training, scoring or execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Training requires at least one aligned sequence.
    #[error("Alignment is empty")]
    EmptyAlignment,

    /// All aligned sequences must share the first sequence's length.
    #[error("Aligned sequence {index} has length {found}, expected {expected}")]
    RaggedAlignment {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// Aligned sequences of length zero carry no columns.
    #[error("Aligned sequences have zero columns")]
    ZeroColumns,

    /// A residue outside the declared alphabet.
    #[error("Sequence {index}: {source}")]
    Symbol {
        index: usize,
        #[source]
        source: InvalidSymbol,
    },

    /// A scored sequence does not fit the profile.
    #[error("Sequence of length {len} at offset {offset} does not fit a profile of {states} states")]
    LengthMismatch {
        len: usize,
        offset: usize,
        states: usize,
    },

    /// Antibodies longer than what the affinity strategy can score.
    #[error("Antibody length {len} exceeds the scorable size {size} for antigen '{antigen}'")]
    AntibodyTooLong {
        len: usize,
        size: usize,
        antigen: String,
    },

    /// Execution needs at least one antigen to key the memory.
    #[error("No antigens supplied")]
    NoAntigens,

    /// Antibodies cannot have zero length.
    #[error("Antibody length must be greater than zero")]
    ZeroLengthAntibody,
}

/// Out-of-range configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Selection fraction outside [0, 1].
    #[error("Invalid fraction for {0}: {1} (must be between 0.0 and 1.0)")]
    InvalidFraction(&'static str, f64),

    /// The iteration budget must be positive.
    #[error("Iteration budget must be greater than zero")]
    ZeroIterations,

    /// `min` must not exceed `max` in a size range.
    #[error("Invalid range for {name}: [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: usize,
        max: usize,
    },

    /// A population must hold at least one antibody.
    #[error("Population size must be greater than zero")]
    EmptyPopulation,

    /// Invalid value for a profile model parameter.
    #[error("Invalid profile parameter: {0}")]
    InvalidProfileParameter(String),

    /// Required builder parameter left unset.
    #[error("Missing required parameter: {0}")]
    MissingRequired(&'static str),

    /// A configuration document could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {e}"))
    }
}

/// Umbrella error for the crate's public entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClonalgError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Convenience alias used by the crate's public entry points.
pub type Result<T> = std::result::Result<T, ClonalgError>;
