use rand::Rng;

use super::config::{ProfileConfig, ScoringMode};
use super::state::{ProfileState, StateKind, Transitions};
use crate::affinity::{AffinityStrategy, Direction};
use crate::base::{is_gap, SequenceAlphabet};
use crate::errors::{InputError, Result};
use crate::simulation::Antigen;

/// Profile model trained from a multiple sequence alignment.
///
/// The model is built by [`train`](Self::train) and is read-only afterwards.
/// Each alignment column becomes a Match, Delete or Insert position following
/// the rule documented on [`ProfileConfig`].
///
/// # Examples
///
/// ```rust
/// use clonalg_sim::base::SequenceAlphabet;
/// use clonalg_sim::profile::{ProfileConfig, ProfileModel};
///
/// let alignment = ["AACGT", "AATGT", "AACGA"];
/// let model = ProfileModel::train(&alignment, SequenceAlphabet::Dna, ProfileConfig::default()).unwrap();
/// assert_eq!(model.len(), 5);
/// assert!(model.score(b"AACGT").unwrap() > model.score(b"AATGA").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileModel {
    alphabet: SequenceAlphabet,
    config: ProfileConfig,
    states: Vec<ProfileState>,
    num_sequences: usize,
    num_columns: usize,
}

impl ProfileModel {
    /// Train a profile from equal-length aligned sequences.
    ///
    /// Residues are matched case-insensitively; gap bytes are never counted.
    ///
    /// # Errors
    /// - `ConfigError::InvalidProfileParameter` for a threshold outside `[0, 1]`.
    /// - `InputError::EmptyAlignment`, `ZeroColumns` or `RaggedAlignment` for
    ///   malformed alignments.
    /// - `InputError::Symbol` for residues outside `alphabet`.
    pub fn train<S: AsRef<[u8]>>(
        sequences: &[S],
        alphabet: SequenceAlphabet,
        config: ProfileConfig,
    ) -> Result<Self> {
        config.validate()?;

        let width = sequences
            .first()
            .ok_or(InputError::EmptyAlignment)?
            .as_ref()
            .len();
        if width == 0 {
            return Err(InputError::ZeroColumns.into());
        }

        for (index, seq) in sequences.iter().enumerate() {
            let seq = seq.as_ref();
            if seq.len() != width {
                return Err(InputError::RaggedAlignment {
                    index,
                    expected: width,
                    found: seq.len(),
                }
                .into());
            }
            for &b in seq {
                alphabet
                    .check(b.to_ascii_uppercase())
                    .map_err(|source| InputError::Symbol { index, source })?;
            }
        }

        let kinds: Vec<StateKind> = (0..width)
            .map(|column| classify(sequences, column, config.delete_threshold))
            .collect();

        let mut states = Vec::with_capacity(width);
        let mut column = 0;
        while column < width {
            let kind = kinds[column];
            let end = if kind == StateKind::Insert && config.collapse_inserts {
                column + kinds[column..]
                    .iter()
                    .take_while(|&&k| k == StateKind::Insert)
                    .count()
            } else {
                column + 1
            };
            states.push(build_state(sequences, alphabet, kind, column..end));
            column = end;
        }

        log::debug!(
            "Trained {} profile: {} sequences, {} columns, {} states",
            alphabet,
            sequences.len(),
            width,
            states.len()
        );

        Ok(Self {
            alphabet,
            config,
            states,
            num_sequences: sequences.len(),
            num_columns: width,
        })
    }

    #[inline]
    pub fn alphabet(&self) -> SequenceAlphabet {
        self.alphabet
    }

    #[inline]
    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    #[inline]
    pub fn states(&self) -> &[ProfileState] {
        &self.states
    }

    /// Number of profile positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of aligned sequences the model was trained on.
    #[inline]
    pub fn num_sequences(&self) -> usize {
        self.num_sequences
    }

    /// Number of alignment columns the model was trained on.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Consensus string over emitting states; Delete states are skipped.
    pub fn consensus(&self) -> String {
        self.states
            .iter()
            .filter_map(|s| s.consensus(self.alphabet))
            .map(char::from)
            .collect()
    }

    /// Best-path score of a full-length sequence.
    ///
    /// This is a greedy single-path product, not a forward sum over all state
    /// paths: for each position it multiplies the state's emission
    /// probability for the symbol (1 for a gap) by the state's largest
    /// transition probability. Symbols outside the alphabet have emission 0.
    /// Zero factors are handled by the configured [`ZeroPolicy`].
    ///
    /// [`ZeroPolicy`]: super::ZeroPolicy
    pub fn score(&self, seq: &[u8]) -> std::result::Result<f64, InputError> {
        self.check_full_length(seq)?;
        self.score_at(seq, 0)
    }

    /// Score `seq` against the states `offset..offset + seq.len()`.
    pub fn score_at(&self, seq: &[u8], offset: usize) -> std::result::Result<f64, InputError> {
        let states = offset
            .checked_add(seq.len())
            .and_then(|end| self.states.get(offset..end))
            .ok_or(InputError::LengthMismatch {
                len: seq.len(),
                offset,
                states: self.states.len(),
            })?;

        let policy = self.config.zero_policy;
        let score = states.iter().zip(seq).fold(1.0, |acc, (state, &b)| {
            let emission = if is_gap(b) {
                1.0
            } else {
                self.alphabet
                    .index_of(b.to_ascii_uppercase())
                    .map_or(0.0, |i| state.emissions[i])
            };
            policy.apply(policy.apply(acc, emission), state.transitions.max())
        });

        Ok(score)
    }

    /// `ln(score) - len * ln(1 / A)` for a full-length sequence, where `A` is
    /// the alphabet size.
    pub fn log_odds(&self, seq: &[u8]) -> std::result::Result<f64, InputError> {
        self.check_full_length(seq)?;
        self.log_odds_at(seq, 0)
    }

    /// Windowed form of [`log_odds`](Self::log_odds).
    pub fn log_odds_at(&self, seq: &[u8], offset: usize) -> std::result::Result<f64, InputError> {
        let score = self.score_at(seq, offset)?;
        Ok(score.ln() - seq.len() as f64 * self.background())
    }

    /// Affinity on the probability scale, whatever the scoring mode.
    pub fn probability(&self, affinity: f64, len: usize) -> f64 {
        match self.config.scoring {
            ScoringMode::Probability => affinity,
            ScoringMode::LogOdds => (affinity + len as f64 * self.background()).exp(),
        }
    }

    /// Log-probability of one symbol under the uniform background.
    #[inline]
    fn background(&self) -> f64 {
        (1.0 / self.alphabet.size() as f64).ln()
    }

    fn check_full_length(&self, seq: &[u8]) -> std::result::Result<(), InputError> {
        if seq.len() != self.states.len() {
            return Err(InputError::LengthMismatch {
                len: seq.len(),
                offset: 0,
                states: self.states.len(),
            });
        }
        Ok(())
    }
}

impl AffinityStrategy for ProfileModel {
    #[inline]
    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    /// Number of profile positions; the antigen does not matter.
    #[inline]
    fn sequence_size(&self, _antigen: &Antigen) -> usize {
        self.states.len()
    }

    fn calculate(
        &self,
        candidate: &[u8],
        _antigen: &Antigen,
        offset: usize,
    ) -> std::result::Result<f64, InputError> {
        match self.config.scoring {
            ScoringMode::Probability => self.score_at(candidate, offset),
            ScoringMode::LogOdds => self.log_odds_at(candidate, offset),
        }
    }

    fn clone_rate<R: Rng + ?Sized>(&self, affinity: f64, len: usize, _rng: &mut R) -> f64 {
        self.probability(affinity, len).clamp(0.0, 1.0)
    }

    fn mutation_rate<R: Rng + ?Sized>(&self, affinity: f64, len: usize, _rng: &mut R) -> f64 {
        1.0 - self.probability(affinity, len).clamp(0.0, 1.0)
    }
}

fn classify<S: AsRef<[u8]>>(sequences: &[S], column: usize, delete_threshold: f64) -> StateKind {
    let gapped = sequences
        .iter()
        .filter(|s| is_gap(s.as_ref()[column]))
        .count();
    if gapped == 0 {
        StateKind::Match
    } else if (gapped as f64 / sequences.len() as f64) < delete_threshold {
        StateKind::Delete
    } else {
        StateKind::Insert
    }
}

fn build_state<S: AsRef<[u8]>>(
    sequences: &[S],
    alphabet: SequenceAlphabet,
    kind: StateKind,
    columns: std::ops::Range<usize>,
) -> ProfileState {
    if kind == StateKind::Delete {
        return ProfileState {
            kind,
            emissions: vec![0.0; alphabet.size()],
            transitions: Transitions::NONE,
            columns,
        };
    }

    let mut counts = vec![0usize; alphabet.size()];
    let mut with_residue = 0usize;
    for seq in sequences {
        let mut seen = false;
        for &b in &seq.as_ref()[columns.clone()] {
            if let Some(i) = alphabet.index_of(b.to_ascii_uppercase()) {
                counts[i] += 1;
                seen = true;
            }
        }
        with_residue += usize::from(seen);
    }

    let total: usize = counts.iter().sum();
    let emissions = if total == 0 {
        vec![0.0; alphabet.size()]
    } else {
        counts.iter().map(|&c| c as f64 / total as f64).collect()
    };

    let transitions = match kind {
        StateKind::Insert => {
            let stay = with_residue as f64 / sequences.len() as f64;
            Transitions {
                to_match: 1.0 - stay,
                to_insert: stay,
                to_delete: 0.0,
            }
        }
        _ => Transitions::MATCH,
    };

    ProfileState {
        kind,
        emissions,
        transitions,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Sequence;
    use crate::errors::{ClonalgError, ConfigError};
    use crate::profile::ZeroPolicy;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::str::FromStr;

    const ALIGNMENT: [&str; 3] = ["AACGT", "AATGT", "AACGA"];

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn train(alignment: &[&str], config: ProfileConfig) -> ProfileModel {
        ProfileModel::train(alignment, SequenceAlphabet::Dna, config).unwrap()
    }

    #[test]
    fn test_ungapped_alignment_gives_match_states() {
        let model = train(&ALIGNMENT, ProfileConfig::default());
        assert_eq!(model.len(), 5);
        assert!(model.states().iter().all(|s| s.kind() == StateKind::Match));

        // A=0, C=1, G=2, T=3
        assert_eq!(model.states()[0].emissions(), &[1.0, 0.0, 0.0, 0.0]);
        let col2 = model.states()[2].emissions();
        assert!(approx(col2[1], 2.0 / 3.0));
        assert!(approx(col2[3], 1.0 / 3.0));
        assert_eq!(model.states()[2].transitions(), Transitions::MATCH);
        assert_eq!(model.consensus(), "AACGT");
    }

    #[test]
    fn test_training_is_deterministic() {
        let a = train(&ALIGNMENT, ProfileConfig::default());
        let b = train(&ALIGNMENT, ProfileConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_emissions_normalized() {
        let alignment = ["AC-TA", "AGGT-", "A-CT-", "TCGTA"];
        let model = train(&alignment, ProfileConfig::default());
        for state in model.states() {
            let sum: f64 = state.emissions().iter().sum();
            match state.kind() {
                StateKind::Delete => assert_eq!(sum, 0.0),
                _ => assert!(approx(sum, 1.0), "{state:?}"),
            }
        }
    }

    #[test]
    fn test_all_gap_column_has_zero_emissions() {
        let model = train(&["A-C", "A-C"], ProfileConfig::default());
        assert_eq!(model.len(), 3);
        let insert = &model.states()[1];
        assert_eq!(insert.kind(), StateKind::Insert);
        assert_eq!(insert.emissions().iter().sum::<f64>(), 0.0);
        assert_eq!(insert.transitions().to_insert, 0.0);
        assert_eq!(insert.transitions().to_match, 1.0);
    }

    #[test]
    fn test_column_classification() {
        // Column 1: 2 of 3 gapped (Insert). Column 3: 1 of 3 gapped (Delete).
        let model = train(&["A-CT", "AGC-", "A-CT"], ProfileConfig::default());
        let kinds: Vec<StateKind> = model.states().iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![StateKind::Match, StateKind::Insert, StateKind::Match, StateKind::Delete]
        );

        let insert = &model.states()[1];
        assert_eq!(insert.emissions(), &[0.0, 0.0, 1.0, 0.0]);
        assert!(approx(insert.transitions().to_insert, 1.0 / 3.0));
        assert!(approx(insert.transitions().to_match, 2.0 / 3.0));

        let delete = &model.states()[3];
        assert_eq!(delete.emissions(), &[0.0; 4]);
        assert_eq!(delete.transitions(), Transitions::NONE);
    }

    #[test]
    fn test_delete_threshold_zero_disables_delete_states() {
        let config = ProfileConfig {
            delete_threshold: 0.0,
            ..Default::default()
        };
        let model = train(&["ACGT", "AC-T", "ACGT"], config);
        assert_eq!(model.states()[2].kind(), StateKind::Insert);
    }

    #[test]
    fn test_insert_runs_collapse() {
        let alignment = ["A--T", "AG-T", "A-CT"];
        let model = train(&alignment, ProfileConfig::default());
        assert_eq!(model.len(), 3);
        let insert = &model.states()[1];
        assert_eq!(insert.kind(), StateKind::Insert);
        assert_eq!(insert.columns(), 1..3);
        assert_eq!(insert.emissions(), &[0.0, 0.5, 0.5, 0.0]);
        assert!(approx(insert.transitions().to_insert, 2.0 / 3.0));

        let config = ProfileConfig {
            collapse_inserts: false,
            ..Default::default()
        };
        let model = train(&alignment, config);
        assert_eq!(model.len(), 4);
        assert_eq!(model.states()[2].columns(), 2..3);
    }

    #[test]
    fn test_training_errors() {
        let empty: [&str; 0] = [];
        let err = ProfileModel::train(&empty, SequenceAlphabet::Dna, ProfileConfig::default())
            .unwrap_err();
        assert_eq!(err, ClonalgError::InvalidInput(InputError::EmptyAlignment));

        let err = ProfileModel::train(&["ACG", "AC"], SequenceAlphabet::Dna, ProfileConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ClonalgError::InvalidInput(InputError::RaggedAlignment { index: 1, expected: 3, found: 2 })
        ));

        let err = ProfileModel::train(&["", ""], SequenceAlphabet::Dna, ProfileConfig::default())
            .unwrap_err();
        assert_eq!(err, ClonalgError::InvalidInput(InputError::ZeroColumns));

        let err = ProfileModel::train(&["ACG", "ACU"], SequenceAlphabet::Dna, ProfileConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ClonalgError::InvalidInput(InputError::Symbol { index: 1, .. })
        ));

        let config = ProfileConfig {
            delete_threshold: 2.0,
            ..Default::default()
        };
        let err = ProfileModel::train(&["ACG"], SequenceAlphabet::Dna, config).unwrap_err();
        assert!(matches!(
            err,
            ClonalgError::Configuration(ConfigError::InvalidProfileParameter(_))
        ));
    }

    #[test]
    fn test_lowercase_training_data() {
        let upper = train(&ALIGNMENT, ProfileConfig::default());
        let lower = train(&["aacgt", "aatgt", "aacga"], ProfileConfig::default());
        assert_eq!(upper.states(), lower.states());
    }

    #[test]
    fn test_score_values() {
        let model = train(&ALIGNMENT, ProfileConfig::default());
        assert!(approx(model.score(b"AACGT").unwrap(), 4.0 / 9.0));
        assert!(approx(model.score(b"AATGA").unwrap(), 1.0 / 9.0));
        // Gaps contribute nothing.
        assert!(approx(model.score(b"AA-GT").unwrap(), 2.0 / 3.0));
    }

    #[test]
    fn test_score_monotonic() {
        let model = train(&ALIGNMENT, ProfileConfig::default());
        let strong = model.score(b"AACGT").unwrap();
        let weak = model.score(b"AACGA").unwrap();
        let weakest = model.score(b"AATGA").unwrap();
        assert!(strong >= weak);
        assert!(weak >= weakest);
    }

    #[test]
    fn test_score_length_mismatch() {
        let model = train(&ALIGNMENT, ProfileConfig::default());
        assert!(matches!(
            model.score(b"AACG"),
            Err(InputError::LengthMismatch { len: 4, offset: 0, states: 5 })
        ));
        assert!(model.log_odds(b"AACGTT").is_err());
    }

    #[test]
    fn test_zero_policy() {
        let neutral = train(&ALIGNMENT, ProfileConfig::default());
        let absorbing = train(
            &ALIGNMENT,
            ProfileConfig {
                zero_policy: ZeroPolicy::Absorbing,
                ..Default::default()
            },
        );

        // C never appears in column 0.
        assert!(approx(neutral.score(b"CACGT").unwrap(), 4.0 / 9.0));
        assert_eq!(absorbing.score(b"CACGT").unwrap(), 0.0);
        assert!(approx(absorbing.score(b"AACGT").unwrap(), 4.0 / 9.0));
    }

    #[test]
    fn test_symbols_outside_alphabet_score_as_zero_emission() {
        let neutral = train(&ALIGNMENT, ProfileConfig::default());
        let absorbing = train(
            &ALIGNMENT,
            ProfileConfig {
                zero_policy: ZeroPolicy::Absorbing,
                ..Default::default()
            },
        );
        assert!(approx(neutral.score(b"NACGT").unwrap(), 4.0 / 9.0));
        assert_eq!(absorbing.score(b"NACGT").unwrap(), 0.0);
        // Lowercase is the same symbol.
        assert!(approx(neutral.score(b"aacgt").unwrap(), 4.0 / 9.0));
    }

    #[test]
    fn test_delete_state_under_each_policy() {
        let alignment = ["ACGT", "AC-T", "ACGT"];
        let neutral = train(&alignment, ProfileConfig::default());
        assert!(approx(neutral.score(b"ACGT").unwrap(), 1.0));

        let absorbing = train(
            &alignment,
            ProfileConfig {
                zero_policy: ZeroPolicy::Absorbing,
                ..Default::default()
            },
        );
        assert_eq!(absorbing.score(b"ACGT").unwrap(), 0.0);
    }

    #[test]
    fn test_score_at_window() {
        let model = train(&ALIGNMENT, ProfileConfig::default());
        assert!(approx(model.score_at(b"CG", 2).unwrap(), 2.0 / 3.0));
        assert!(approx(model.score_at(b"GT", 3).unwrap(), 2.0 / 3.0));
        assert!(model.score_at(b"GT", 4).is_err());
        assert!(model.score_at(b"G", usize::MAX).is_err());
    }

    #[test]
    fn test_log_odds() {
        let model = train(&ALIGNMENT, ProfileConfig::default());
        let expected = (4.0f64 / 9.0).ln() + 5.0 * 4.0f64.ln();
        assert!(approx(model.log_odds(b"AACGT").unwrap(), expected));
    }

    #[test]
    fn test_strategy_rates() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let model = train(&ALIGNMENT, ProfileConfig::default());
        let antigen = Antigen::new("a", "", Sequence::from_str("AACGT").unwrap());

        assert_eq!(model.direction(), Direction::Maximize);
        assert_eq!(model.sequence_size(&antigen), 5);

        let affinity = model.calculate(b"AACGT", &antigen, 0).unwrap();
        assert!(approx(model.clone_rate(affinity, 5, &mut rng), 4.0 / 9.0));
        assert!(approx(model.mutation_rate(affinity, 5, &mut rng), 5.0 / 9.0));
        assert!(model.clone_rate(f64::NAN, 5, &mut rng).is_nan());
    }

    #[test]
    fn test_log_odds_mode_rates_use_probability_scale() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let model = train(
            &ALIGNMENT,
            ProfileConfig {
                scoring: ScoringMode::LogOdds,
                ..Default::default()
            },
        );
        let antigen = Antigen::new("a", "", Sequence::from_str("AACGT").unwrap());
        let affinity = model.calculate(b"AACGT", &antigen, 0).unwrap();
        assert!(affinity > 1.0);
        let rate = model.clone_rate(affinity, 5, &mut rng);
        assert!((rate - 4.0 / 9.0).abs() < 1e-9);
    }
}
