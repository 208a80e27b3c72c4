use clonalg_sim::analysis::PatternReport;
use clonalg_sim::profile::ProfileModel;
use clonalg_sim::simulation::{Configuration, RunStatistics, SizeSpec};

fn size_spec(spec: SizeSpec) -> String {
    match spec {
        SizeSpec::Fixed(n) => n.to_string(),
        SizeSpec::Range { min, max } => format!("{min}..={max}"),
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.6e}"))
}

pub fn print_parameters(config: &Configuration) {
    let execution = &config.execution;
    let selection = &config.selection;
    let population = &config.population;
    let profile = &config.profile;

    println!("\n📋 Run Configuration");
    println!("  • Iterations: {} [-i, --iterations]", execution.iterations);
    if let Some(seed) = execution.seed {
        println!("  • Random Seed: {seed} [--seed]");
    } else {
        println!("  • Random Seed: Random [--seed]");
    }

    println!("\n🧫 Population");
    println!(
        "  • Size: {} [-n, --population-size]",
        size_spec(population.size)
    );
    println!(
        "  • Antibody Length: {}",
        size_spec(population.antibody_length)
    );
    println!("  • Window: {:?} [-w, --window]", population.window);

    println!("\n🎯 Selection");
    println!(
        "  • Selected for cloning: {:.2} [--percent-high]",
        selection.percent_high
    );
    println!(
        "  • Replaced per step: {:.2} [--percent-low]",
        selection.percent_low
    );

    println!("\n🧬 Profile");
    println!(
        "  • Delete Threshold: {:.2} [--delete-threshold]",
        profile.delete_threshold
    );
    println!("  • Collapse Inserts: {}", profile.collapse_inserts);
    println!("  • Zero Policy: {:?}", profile.zero_policy);
    println!("  • Scoring: {:?}", profile.scoring);
    println!();
}

pub fn print_statistics(index: usize, stats: &RunStatistics) {
    println!(
        "  [{index:>3}] memory={:<4} best={:<14} mean={:<14} sd={:<14} degenerate={:<5} {:.2}s",
        stats.memory_entries,
        optional(stats.best),
        optional(stats.mean),
        optional(stats.std_dev),
        stats.degenerate_steps,
        stats.elapsed_seconds
    );
}

pub fn print_profile(model: &ProfileModel) {
    println!("\n🧬 Profile Model");
    println!("  • Alphabet: {}", model.alphabet());
    println!("  • Sequences: {}", model.num_sequences());
    println!("  • Columns: {}", model.num_columns());
    println!("  • States: {}", model.len());
    println!("  • Consensus: {}", model.consensus());
    println!();
    println!("  {:>5}  {:<6} {:<9} {:>4}  {:>6} {:>6} {:>6}", "state", "kind", "columns", "cons", "M", "I", "D");
    for (i, state) in model.states().iter().enumerate() {
        let columns = state.columns();
        let consensus = state
            .consensus(model.alphabet())
            .map_or('-', char::from);
        let t = state.transitions();
        println!(
            "  {:>5}  {:<6} {:<9} {:>4}  {:>6.3} {:>6.3} {:>6.3}",
            i,
            state.kind().to_string(),
            format!("{}..{}", columns.start, columns.end),
            consensus,
            t.to_match,
            t.to_insert,
            t.to_delete
        );
    }
    println!();
}

pub fn print_pattern_report(report: &PatternReport) {
    println!("\n🔎 Pattern Recovery");
    if report.all_found() {
        println!("  • All {} expected patterns were found!", report.expected);
    } else {
        println!(
            "  • Found {} of {} expected patterns ({:.0}%)",
            report.found.len(),
            report.expected,
            report.recovery() * 100.0
        );
    }
    for pattern in &report.found {
        println!("    ✓ {pattern}");
    }
    for pattern in &report.missing {
        println!("    ✗ {pattern}");
    }
    println!();
}
