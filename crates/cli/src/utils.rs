use anyhow::{bail, Context, Result};
use clonalg_sim::base::{Sequence, SequenceAlphabet};
use clonalg_sim::profile::{ProfileConfig, ScoringMode, ZeroPolicy};
use clonalg_sim::simulation::Antigen;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use crate::args::{AlphabetArg, ProfileOptions};

/// One FASTA record before alphabet checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub name: String,
    pub host: String,
    pub sequence: String,
}

/// Parse FASTA records from a file.
///
/// Headers are either `>name|host ...` or `>name host ...`. Sequence lines
/// are concatenated with surrounding whitespace removed.
pub fn read_fasta(path: impl AsRef<Path>) -> Result<Vec<FastaRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_fasta(BufReader::new(file)).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_fasta(reader: impl BufRead) -> Result<Vec<FastaRecord>> {
    let mut records = Vec::new();
    let mut current: Option<FastaRecord> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            let (name, host) = parse_header(header)?;
            current = Some(FastaRecord {
                name,
                host,
                sequence: String::new(),
            });
        } else if let Some(record) = current.as_mut() {
            record.sequence.extend(line.split_whitespace());
        } else {
            bail!("Sequence data before the first FASTA header");
        }
    }

    if let Some(record) = current {
        records.push(record);
    }

    if records.is_empty() {
        bail!("No sequences found in FASTA file");
    }
    if let Some(empty) = records.iter().find(|r| r.sequence.is_empty()) {
        bail!("Record '{}' has no sequence", empty.name);
    }

    Ok(records)
}

fn parse_header(header: &str) -> Result<(String, String)> {
    let mut words = header.split_whitespace();
    let id = words.next().context("Empty FASTA header")?;

    let (name, host) = match id.split_once('|') {
        Some((name, rest)) => (name, rest.split('|').next().unwrap_or_default()),
        None => (id, words.next().unwrap_or_default()),
    };
    if name.is_empty() {
        bail!("FASTA header '{header}' has no name");
    }
    Ok((name.to_string(), host.to_string()))
}

/// Split records into groups; a name already seen in the current group
/// starts a new one.
pub fn split_groups(records: Vec<FastaRecord>) -> Vec<Vec<FastaRecord>> {
    let mut groups = Vec::new();
    let mut current: Vec<FastaRecord> = Vec::new();

    for record in records {
        if current.iter().any(|r| r.name == record.name) {
            groups.push(std::mem::take(&mut current));
        }
        current.push(record);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Use the requested alphabet or detect one from every record.
pub fn resolve_alphabet(arg: AlphabetArg, records: &[FastaRecord]) -> Result<SequenceAlphabet> {
    if let Some(alphabet) = arg.resolve() {
        return Ok(alphabet);
    }
    let residues: Vec<u8> = records
        .iter()
        .flat_map(|r| r.sequence.bytes())
        .collect();
    SequenceAlphabet::detect(&residues)
        .context("Could not detect the alphabet; pass --alphabet explicitly")
}

/// Build antigens, checking every residue against `alphabet`.
pub fn to_antigens(records: &[FastaRecord], alphabet: SequenceAlphabet) -> Result<Vec<Antigen>> {
    records
        .iter()
        .map(|r| {
            let sequence = Sequence::parse(&r.sequence, alphabet)
                .with_context(|| format!("Invalid sequence '{}'", r.name))?;
            Ok(Antigen::new(r.name.as_str(), r.host.as_str(), sequence))
        })
        .collect()
}

/// Apply command line profile options on top of `base`.
pub fn profile_config(options: &ProfileOptions, base: ProfileConfig) -> ProfileConfig {
    let mut config = base;
    if let Some(threshold) = options.delete_threshold {
        config.delete_threshold = threshold;
    }
    if options.no_collapse {
        config.collapse_inserts = false;
    }
    if options.absorbing {
        config.zero_policy = ZeroPolicy::Absorbing;
    }
    if options.log_odds {
        config.scoring = ScoringMode::LogOdds;
    }
    config
}

/// Write `value` as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Read a JSON file into `T`.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn parse(text: &str) -> Vec<FastaRecord> {
        parse_fasta(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_parse_fasta_pipe_header() {
        let records = parse(">tr|A0A1|Human spike\nAC-GT\nTT\n>tr|B0B2|Bat\nACAGTTT\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "tr");
        assert_eq!(records[0].host, "A0A1");
        assert_eq!(records[0].sequence, "AC-GTTT");
    }

    #[test]
    fn test_parse_fasta_space_header() {
        let records = parse(">seq1 human\nACGT\n\n>seq2\nTTGA\n");
        assert_eq!(records[0].name, "seq1");
        assert_eq!(records[0].host, "human");
        assert_eq!(records[1].host, "");
    }

    #[test]
    fn test_parse_fasta_errors() {
        assert!(parse_fasta(Cursor::new("")).is_err());
        assert!(parse_fasta(Cursor::new("ACGT\n>a\nAC\n")).is_err());
        assert!(parse_fasta(Cursor::new(">a\n>b\nAC\n")).is_err());
    }

    #[test]
    fn test_read_fasta_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">a|h").unwrap();
        writeln!(file, "ACGT").unwrap();
        let records = read_fasta(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].host, "h");
    }

    #[test]
    fn test_split_groups_on_repeated_name() {
        let records = parse(">a\nAC\n>b\nAG\n>a\nTT\n>b\nTA\n>c\nGG\n>a\nCC\n");
        let groups = split_groups(records);
        let names: Vec<Vec<&str>> = groups
            .iter()
            .map(|g| g.iter().map(|r| r.name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["a", "b"], vec!["a", "b", "c"], vec!["a"]]);
    }

    #[test]
    fn test_resolve_alphabet() {
        let dna = parse(">a\nAC-GT\n");
        let rna = parse(">a\nACGU\n");
        let protein = parse(">a\nMKWV\n");
        assert_eq!(
            resolve_alphabet(AlphabetArg::Auto, &dna).unwrap(),
            SequenceAlphabet::Dna
        );
        assert_eq!(
            resolve_alphabet(AlphabetArg::Auto, &rna).unwrap(),
            SequenceAlphabet::Rna
        );
        assert_eq!(
            resolve_alphabet(AlphabetArg::Auto, &protein).unwrap(),
            SequenceAlphabet::Protein
        );
        assert_eq!(
            resolve_alphabet(AlphabetArg::Protein, &dna).unwrap(),
            SequenceAlphabet::Protein
        );
        assert!(resolve_alphabet(AlphabetArg::Auto, &parse(">a\n1234\n")).is_err());
    }

    #[test]
    fn test_to_antigens_checks_alphabet() {
        let records = parse(">a|h\nACGU\n");
        assert!(to_antigens(&records, SequenceAlphabet::Dna).is_err());
        let antigens = to_antigens(&records, SequenceAlphabet::Rna).unwrap();
        assert_eq!(antigens[0].name(), "a");
        assert_eq!(antigens[0].host(), "h");
    }

    #[test]
    fn test_profile_config_overrides() {
        let options = ProfileOptions {
            delete_threshold: Some(0.3),
            no_collapse: true,
            absorbing: true,
            log_odds: false,
        };
        let config = profile_config(&options, ProfileConfig::default());
        assert_eq!(config.delete_threshold, 0.3);
        assert!(!config.collapse_inserts);
        assert_eq!(config.zero_policy, ZeroPolicy::Absorbing);
        assert_eq!(config.scoring, ScoringMode::Probability);
    }
}
