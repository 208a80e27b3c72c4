use clap::{Args, ValueEnum};
use clonalg_sim::base::SequenceAlphabet;
use clonalg_sim::simulation::WindowPlacement;
use std::path::PathBuf;

use crate::defaults;

/// How the input alignment is turned into runs.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// One alignment, one run per antibody length.
    Single,
    /// A repeated record name starts a new alignment group; one run per group.
    Groups,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphabetArg {
    /// Detect from the residues (DNA, then RNA, then protein)
    Auto,
    Dna,
    Rna,
    Protein,
}

impl AlphabetArg {
    /// The explicit alphabet, or `None` for detection.
    pub fn resolve(self) -> Option<SequenceAlphabet> {
        match self {
            Self::Auto => None,
            Self::Dna => Some(SequenceAlphabet::Dna),
            Self::Rna => Some(SequenceAlphabet::Rna),
            Self::Protein => Some(SequenceAlphabet::Protein),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    /// Likelihood under a profile trained from the alignment
    Profile,
    /// Fraction of identical positions
    Hamming,
    /// Distance between composition features
    Euclidean,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowArg {
    Random,
    Best,
}

impl From<WindowArg> for WindowPlacement {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Random => WindowPlacement::Random,
            WindowArg::Best => WindowPlacement::Best,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output configuration path
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub output: PathBuf,

    /// Use the defaults of this run mode
    #[arg(short, long, value_enum, default_value = "single")]
    pub mode: RunMode,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// Profile training options shared by `run` and `profile`.
#[derive(Args, Debug, Clone)]
pub struct ProfileOptions {
    /// Gapped fraction at which a column becomes an insert state
    #[arg(long)]
    pub delete_threshold: Option<f64>,

    /// Keep adjacent insert columns as separate states
    #[arg(long)]
    pub no_collapse: bool,

    /// Multiply through zero emissions instead of skipping them
    #[arg(long)]
    pub absorbing: bool,

    /// Score with log-odds against a uniform background
    #[arg(long)]
    pub log_odds: bool,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Aligned FASTA input
    pub input: PathBuf,

    /// Output directory for results and memory files
    #[arg(short, long, default_value = defaults::OUTPUT_DIR)]
    pub output: PathBuf,

    /// How runs are derived from the input
    #[arg(short, long, value_enum, default_value = "single")]
    pub mode: RunMode,

    /// Residue alphabet
    #[arg(short, long, value_enum, default_value = "auto")]
    pub alphabet: AlphabetArg,

    /// Affinity strategy
    #[arg(short, long, value_enum, default_value = "profile")]
    pub strategy: StrategyArg,

    /// Base configuration file (see `clonalg init`)
    ///
    /// Command line options override values from the file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Iterations per run (default depends on mode)
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Fraction of the population selected for cloning
    #[arg(long)]
    pub percent_high: Option<f64>,

    /// Fraction of the selected clones replaced each step
    #[arg(long)]
    pub percent_low: Option<f64>,

    /// Fixed population size (default: drawn from 1..=100)
    #[arg(short = 'n', long)]
    pub population_size: Option<usize>,

    /// Shortest antibody in the length sweep (default: from the configuration)
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Longest antibody; clamped to what the strategy can score
    /// (default: from the configuration)
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Placement of antibodies shorter than the scored sequence
    #[arg(short, long, value_enum)]
    pub window: Option<WindowArg>,

    #[command(flatten)]
    pub profile: ProfileOptions,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Expected patterns to look for after the runs (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub patterns: Vec<String>,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Aligned FASTA input
    pub input: PathBuf,

    /// Residue alphabet
    #[arg(short, long, value_enum, default_value = "auto")]
    pub alphabet: AlphabetArg,

    #[command(flatten)]
    pub profile: ProfileOptions,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Directory written by `clonalg run`
    #[arg(short, long, default_value = defaults::OUTPUT_DIR)]
    pub dir: PathBuf,

    /// Mode the directory was produced with
    #[arg(short, long, value_enum, default_value = "single")]
    pub mode: RunMode,

    /// Expected patterns (comma separated; default: built-in motif list)
    #[arg(short, long, value_delimiter = ',')]
    pub patterns: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}
