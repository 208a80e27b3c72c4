use anyhow::{Context, Result};
use clonalg_sim::simulation::{Configuration, SizeSpec};
use std::fs;

use crate::args::{InitArgs, RunMode};
use crate::defaults;
use crate::printing::print_parameters;

pub fn write_configuration(args: &InitArgs) -> Result<()> {
    let output = &args.output;

    println!("🧫 Clonalg - Pattern Discovery by Clonal Selection");
    println!("============================================\n");

    if output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; use --force to overwrite",
            output.display()
        );
    }

    let mut config = build_configuration(args.mode);
    config.execution.seed = args.seed;
    config
        .validate()
        .context("Default configuration is invalid")?;

    print_parameters(&config);

    let json = config.to_json().context("Failed to serialize configuration")?;
    fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;

    println!("✓ Configuration written: {}", output.display());
    println!("\n💡 Use 'clonalg run <ALIGNMENT> --config {}' to start", output.display());

    Ok(())
}

/// Defaults for a run mode. The antibody length range is the length sweep;
/// each run uses one fixed length from it.
pub fn build_configuration(mode: RunMode) -> Configuration {
    let mut config = Configuration::default();
    let (iterations, high, low) = match mode {
        RunMode::Single => (
            defaults::SINGLE_ITERATIONS,
            defaults::SINGLE_PERCENT_HIGH,
            defaults::SINGLE_PERCENT_LOW,
        ),
        RunMode::Groups => (
            defaults::GROUPS_ITERATIONS,
            defaults::GROUPS_PERCENT_HIGH,
            defaults::GROUPS_PERCENT_LOW,
        ),
    };
    config.execution.iterations = iterations;
    config.selection.percent_high = high;
    config.selection.percent_low = low;
    config.population.size = SizeSpec::Range {
        min: defaults::MIN_POPULATION,
        max: defaults::MAX_POPULATION,
    };
    config.population.antibody_length = SizeSpec::Range {
        min: defaults::MIN_ANTIBODY_LENGTH,
        max: defaults::MAX_ANTIBODY_LENGTH,
    };
    config
}
