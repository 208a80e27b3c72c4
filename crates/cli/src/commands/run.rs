use anyhow::{bail, Context, Result};
use clonalg_sim::affinity::{AffinityModel, AffinityStrategy, EuclideanDistance, HammingSimilarity};
use clonalg_sim::analysis::evaluate_patterns;
use clonalg_sim::base::SequenceAlphabet;
use clonalg_sim::profile::{ProfileConfig, ProfileModel};
use clonalg_sim::simulation::{
    Antigen, ClonalSelectionBuilder, Configuration, MemoryRecord, RunOutcome, SizeSpec,
};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::fs;
use std::sync::Arc;

use crate::args::{RunArgs, RunMode, StrategyArg};
use crate::commands::evaluate::discovered_patterns;
use crate::commands::init::build_configuration;
use crate::printing::{print_parameters, print_pattern_report, print_statistics};
use crate::utils::{
    profile_config, read_fasta, resolve_alphabet, split_groups, to_antigens, write_json,
    FastaRecord,
};

/// One independent engine run.
struct RunTask {
    /// Output file index: the antibody length or the group index
    index: usize,
    antigens: Arc<Vec<Antigen>>,
    strategy: AffinityModel,
    length: usize,
}

pub fn run_clonalg(args: &RunArgs) -> Result<()> {
    println!("🧫 Clonalg - Running Clonal Selection");
    println!("============================================\n");

    let records = read_fasta(&args.input)?;
    let alphabet = resolve_alphabet(args.alphabet, &records)?;
    println!(
        "Loaded {} sequences ({} alphabet) from {}",
        records.len(),
        alphabet,
        args.input.display()
    );

    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Configuration::from_json(&text)
                .with_context(|| format!("Invalid configuration {}", path.display()))?
        }
        None => build_configuration(args.mode),
    };
    let (min_length, max_length) = length_range(
        config.population.antibody_length,
        args.min_length,
        args.max_length,
    )?;
    apply_overrides(&mut config, args);
    config.population.antibody_length = if min_length == max_length {
        SizeSpec::Fixed(min_length)
    } else {
        SizeSpec::Range {
            min: min_length,
            max: max_length,
        }
    };
    config.validate().context("Invalid run configuration")?;

    let groups = match args.mode {
        RunMode::Single => vec![records],
        RunMode::Groups => split_groups(records),
    };
    let tasks = plan_tasks(args, &groups, alphabet, config.profile, min_length, max_length)?;

    print_parameters(&config);
    println!("Running {} independent runs...", tasks.len());
    log::info!(
        "{} runs over {} groups with the {:?} strategy",
        tasks.len(),
        groups.len(),
        args.strategy
    );

    // One seed per run, drawn from the master RNG.
    let mut master = if let Some(seed) = config.execution.seed {
        Xoshiro256PlusPlus::seed_from_u64(seed)
    } else {
        Xoshiro256PlusPlus::from_seed(rand::rng().random())
    };
    let seeds: Vec<u64> = tasks.iter().map(|_| master.random()).collect();

    let pb = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new(tasks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let mut outcomes = tasks
        .into_par_iter()
        .zip(seeds)
        .map(|(task, seed)| -> Result<(usize, RunOutcome)> {
            let index = task.index;
            let outcome = execute_task(&config, alphabet, task, seed)?;
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            Ok((index, outcome))
        })
        .collect::<Result<Vec<(usize, RunOutcome)>>>()?;
    outcomes.sort_by_key(|(index, _)| *index);

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    write_json(&args.output.join("config.json"), &config)?;

    println!("\n📊 Results");
    let mut memories: Vec<(usize, Vec<MemoryRecord>)> = Vec::with_capacity(outcomes.len());
    for (index, outcome) in outcomes {
        let records = outcome.memory.records();
        write_json(
            &args.output.join(format!("results{index}.json")),
            &outcome.statistics,
        )?;
        write_json(&args.output.join(format!("memory{index}.json")), &records)?;
        print_statistics(index, &outcome.statistics);
        memories.push((index, records));
    }

    if !args.patterns.is_empty() {
        let discovered = discovered_patterns(args.mode, &memories);
        let report = evaluate_patterns(discovered.iter(), &args.patterns[..]);
        write_json(&args.output.join("patterns.json"), &report)?;
        print_pattern_report(&report);
    }

    println!("\n✓ Runs complete!");
    println!("  Output: {}", args.output.display());
    println!(
        "\n💡 Use 'clonalg evaluate -d {}' to check expected patterns",
        args.output.display()
    );

    Ok(())
}

fn apply_overrides(config: &mut Configuration, args: &RunArgs) {
    if let Some(iterations) = args.iterations {
        config.execution.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.execution.seed = Some(seed);
    }
    if let Some(fraction) = args.percent_high {
        config.selection.percent_high = fraction;
    }
    if let Some(fraction) = args.percent_low {
        config.selection.percent_low = fraction;
    }
    if let Some(size) = args.population_size {
        config.population.size = SizeSpec::Fixed(size);
    }
    if let Some(window) = args.window {
        config.population.window = window.into();
    }
    config.profile = profile_config(&args.profile, config.profile);
}

/// Length sweep bounds: the configured antibody length, with either end
/// replaced by its command line flag.
fn length_range(
    configured: SizeSpec,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Result<(usize, usize)> {
    let min = min_length.unwrap_or(configured.min());
    let max = max_length.unwrap_or(configured.max());
    if min > max {
        bail!("Antibody length range {min}..={max} is empty; check --min-length and --max-length");
    }
    Ok((min, max))
}

fn build_strategy(
    kind: StrategyArg,
    antigens: &[Antigen],
    alphabet: SequenceAlphabet,
    profile: ProfileConfig,
) -> Result<AffinityModel> {
    let model: AffinityModel = match kind {
        StrategyArg::Profile => {
            let alignment: Vec<&[u8]> = antigens.iter().map(|a| a.sequence().as_slice()).collect();
            ProfileModel::train(&alignment, alphabet, profile)
                .context("Failed to train profile model")?
                .into()
        }
        StrategyArg::Hamming => HammingSimilarity.into(),
        StrategyArg::Euclidean => EuclideanDistance::new(alphabet).into(),
    };
    Ok(model)
}

/// Single mode sweeps every antibody length over one alignment; groups mode
/// runs each group once with the longest length that fits.
fn plan_tasks(
    args: &RunArgs,
    groups: &[Vec<FastaRecord>],
    alphabet: SequenceAlphabet,
    profile: ProfileConfig,
    min_length: usize,
    max_length: usize,
) -> Result<Vec<RunTask>> {
    let mut tasks = Vec::new();

    for (g, group) in groups.iter().enumerate() {
        let antigens = Arc::new(to_antigens(group, alphabet)?);
        let strategy = build_strategy(args.strategy, &antigens, alphabet, profile)
            .with_context(|| format!("Group {g}"))?;
        let size = antigens
            .iter()
            .map(|a| strategy.sequence_size(a))
            .min()
            .unwrap_or(0);
        let longest = max_length.min(size);

        if longest < min_length {
            log::warn!(
                "Group {g}: scoring size {size} is shorter than the minimum antibody length {min_length}, skipped"
            );
            continue;
        }

        match args.mode {
            RunMode::Single => {
                for length in min_length..=longest {
                    tasks.push(RunTask {
                        index: length,
                        antigens: Arc::clone(&antigens),
                        strategy: strategy.clone(),
                        length,
                    });
                }
            }
            RunMode::Groups => tasks.push(RunTask {
                index: g,
                antigens,
                strategy,
                length: longest,
            }),
        }
    }

    if tasks.is_empty() {
        bail!(
            "No runs to perform: antibody lengths {min_length}..={max_length} do not fit the input"
        );
    }
    Ok(tasks)
}

fn execute_task(
    config: &Configuration,
    alphabet: SequenceAlphabet,
    task: RunTask,
    seed: u64,
) -> Result<RunOutcome> {
    let mut run_config = config.clone();
    run_config.execution.seed = Some(seed);
    run_config.population.antibody_length = SizeSpec::Fixed(task.length);

    let mut engine = ClonalSelectionBuilder::new()
        .strategy(task.strategy)
        .alphabet(alphabet)
        .configuration(run_config)
        .build()
        .with_context(|| format!("Run {}: invalid configuration", task.index))?;
    engine
        .execute(&task.antigens)
        .with_context(|| format!("Run {} failed", task.index))
}
