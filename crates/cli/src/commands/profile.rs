use anyhow::{Context, Result};
use clonalg_sim::profile::{ProfileConfig, ProfileModel};
use serde::Serialize;

use crate::args::{OutputFormat, ProfileArgs};
use crate::printing::print_profile;
use crate::utils::{profile_config, read_fasta, resolve_alphabet, to_antigens};

#[derive(Serialize)]
struct StateView {
    kind: char,
    columns: [usize; 2],
    consensus: Option<char>,
    emissions: Vec<f64>,
    transitions: [f64; 3],
}

#[derive(Serialize)]
struct ProfileView {
    alphabet: String,
    sequences: usize,
    columns: usize,
    consensus: String,
    states: Vec<StateView>,
}

pub fn show_profile(args: &ProfileArgs) -> Result<()> {
    let records = read_fasta(&args.input)?;
    let alphabet = resolve_alphabet(args.alphabet, &records)?;
    let antigens = to_antigens(&records, alphabet)?;
    let alignment: Vec<&[u8]> = antigens.iter().map(|a| a.sequence().as_slice()).collect();

    let config = profile_config(&args.profile, ProfileConfig::default());
    let model =
        ProfileModel::train(&alignment, alphabet, config).context("Failed to train profile model")?;

    match args.format {
        OutputFormat::Pretty => print_profile(&model),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&profile_view(&model))?);
        }
    }
    Ok(())
}

fn profile_view(model: &ProfileModel) -> ProfileView {
    let states = model
        .states()
        .iter()
        .map(|state| {
            let columns = state.columns();
            let t = state.transitions();
            StateView {
                kind: state.kind().code(),
                columns: [columns.start, columns.end],
                consensus: state.consensus(model.alphabet()).map(char::from),
                emissions: state.emissions().to_vec(),
                transitions: [t.to_match, t.to_insert, t.to_delete],
            }
        })
        .collect();

    ProfileView {
        alphabet: model.alphabet().to_string(),
        sequences: model.num_sequences(),
        columns: model.num_columns(),
        consensus: model.consensus(),
        states,
    }
}
