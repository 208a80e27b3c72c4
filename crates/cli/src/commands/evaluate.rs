use anyhow::{bail, Result};
use clonalg_sim::analysis::{evaluate_patterns, join_fragments};
use clonalg_sim::simulation::MemoryRecord;
use std::fs;
use std::path::Path;

use crate::args::{EvaluateArgs, OutputFormat, RunMode};
use crate::defaults;
use crate::printing::print_pattern_report;
use crate::utils::read_json;

pub fn evaluate_results(args: &EvaluateArgs) -> Result<()> {
    let memories = load_memories(&args.dir)?;
    if memories.is_empty() {
        bail!("No memory files found in {}", args.dir.display());
    }

    let expected: Vec<String> = if args.patterns.is_empty() {
        defaults::EXPECTED_PATTERNS.iter().map(|p| p.to_string()).collect()
    } else {
        args.patterns.clone()
    };

    let discovered = discovered_patterns(args.mode, &memories);
    let report = evaluate_patterns(discovered.iter(), &expected[..]);

    match args.format {
        OutputFormat::Pretty => {
            println!(
                "Read {} memory files ({} patterns) from {}",
                memories.len(),
                discovered.len(),
                args.dir.display()
            );
            print_pattern_report(&report);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Read every `memory{N}.json` in `dir`, ordered by `N`.
pub fn load_memories(dir: &Path) -> Result<Vec<(usize, Vec<MemoryRecord>)>> {
    let mut memories = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let index = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_prefix("memory"))
            .and_then(|rest| rest.strip_suffix(".json"))
            .and_then(|n| n.parse::<usize>().ok());
        if let Some(index) = index {
            memories.push((index, read_json(&path)?));
        }
    }
    memories.sort_by_key(|(index, _)| *index);
    Ok(memories)
}

/// Candidate patterns from a set of runs.
///
/// Length sweeps contribute every memory sequence. Group runs come from
/// consecutive slices of one alignment, so their memory cells are joined
/// position-wise in group order.
pub fn discovered_patterns(mode: RunMode, memories: &[(usize, Vec<MemoryRecord>)]) -> Vec<String> {
    match mode {
        RunMode::Single => memories
            .iter()
            .flat_map(|(_, records)| records.iter().map(|r| r.sequence.clone()))
            .collect(),
        RunMode::Groups => {
            let groups: Vec<Vec<&str>> = memories
                .iter()
                .map(|(_, records)| records.iter().map(|r| r.sequence.as_str()).collect())
                .collect();
            join_fragments(&groups)
        }
    }
}
