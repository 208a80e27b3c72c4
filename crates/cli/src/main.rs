mod args;
mod commands;
pub mod defaults;
mod printing;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

use args::{EvaluateArgs, InitArgs, ProfileArgs, RunArgs};
use commands::{evaluate, init, profile, run};

/// Clonalg: profile-guided clonal selection for sequence patterns
///
/// This tool trains a profile model from aligned DNA, RNA or protein
/// sequences and evolves short candidate sequences that score well against
/// it, keeping the best candidate found for every input sequence.
#[derive(Parser, Debug)]
#[command(name = "clonalg")]
#[command(author, version, about = "Discovers high-affinity patterns in aligned sequences", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel runs
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a run configuration file.
    ///
    /// The file can be edited and passed to `run --config`.
    Init(InitArgs),

    /// Run clonal selection over an alignment.
    ///
    /// Writes results{N}.json and memory{N}.json for every run to the output
    /// directory.
    Run(Box<RunArgs>),

    /// Train a profile model and print its states.
    Profile(ProfileArgs),

    /// Compare discovered memory cells with expected patterns.
    Evaluate(EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Init(args) => {
            init::write_configuration(&args)?;
        }
        Commands::Run(args) => {
            run::run_clonalg(&args)?;
        }
        Commands::Profile(args) => {
            profile::show_profile(&args)?;
        }
        Commands::Evaluate(args) => {
            evaluate::evaluate_results(&args)?;
        }
    }

    Ok(())
}
