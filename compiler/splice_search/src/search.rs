//! Scaffold search over per-line candidate lists.
//!
//! Candidates are parsed once, reduced to frozen configs, and the beam runs
//! over the distinct configs of each line. Every surviving config sequence
//! is a scaffold; the texts whose configs match it line by line form its
//! [`SearchGroup`].

use crate::{
    Beam, Candidate, ConfigKind, FrozenConfig, Hypothesis, LineChoice, SearchConfig, SearchError,
    SearchMode, SearchOption,
};
use rustc_hash::FxHashMap;
use splice_ir::{LineSignature, Tables};
use splice_parse::build_signature;

/// A candidate that parsed.
#[derive(Clone, Debug)]
pub struct ParsedCandidate {
    pub text: String,
    pub cost: f64,
    pub signature: LineSignature,
}

#[derive(Clone, Debug, Default)]
pub struct Parseable {
    pub lines: Vec<Vec<ParsedCandidate>>,
    /// Per line, `Σ exp(-cost)` over the candidates that did not parse.
    pub rejected_mass: Vec<f64>,
}

/// Drop unparseable candidates, keeping the order of the rest.
pub fn filter_parseable(lines: &[Vec<(String, f64)>], tables: &Tables) -> Parseable {
    let mut parseable = Parseable::default();
    for candidates in lines {
        let mut kept = Vec::with_capacity(candidates.len());
        let mut rejected = 0.0;
        for (text, cost) in candidates {
            match build_signature(text, tables) {
                Some(signature) => kept.push(ParsedCandidate {
                    text: text.clone(),
                    cost: *cost,
                    signature,
                }),
                None => rejected += (-cost).exp(),
            }
        }
        parseable.lines.push(kept);
        parseable.rejected_mass.push(rejected);
    }
    parseable
}

/// Merge equal configs, adding their probabilities.
///
/// The merged cost is `-ln Σ exp(-cost)`; configs keep the order of their
/// first appearance.
pub fn marginalize(configs: impl IntoIterator<Item = (FrozenConfig, f64)>) -> Vec<(FrozenConfig, f64)> {
    let mut index: FxHashMap<FrozenConfig, usize> = FxHashMap::default();
    let mut merged: Vec<(FrozenConfig, Vec<f64>)> = Vec::new();
    for (config, cost) in configs {
        match index.get(&config) {
            Some(&slot) => merged[slot].1.push(cost),
            None => {
                index.insert(config.clone(), merged.len());
                merged.push((config, vec![cost]));
            }
        }
    }
    merged
        .into_iter()
        .map(|(config, costs)| {
            let best = costs.iter().copied().fold(f64::INFINITY, f64::min);
            let sum: f64 = costs.iter().map(|c| (best - c).exp()).sum();
            (config, best - sum.ln())
        })
        .collect()
}

/// Candidates sharing one scaffold.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchGroup {
    /// Per line, the `(text, cost)` candidates in their original order.
    pub lines: Vec<Vec<(String, f64)>>,
    /// The scaffold's config per line; `None` when no search ran.
    pub configs: Vec<Option<FrozenConfig>>,
    /// Cost of the scaffold itself.
    pub cost: f64,
}

#[derive(Clone, Debug, Default)]
pub struct SearchOutcome {
    /// `None` when no assembly satisfies the constraints.
    pub groups: Option<Vec<SearchGroup>>,
    pub rejected_mass: Vec<f64>,
    pub rank_histories: Vec<Vec<usize>>,
    pub cost_histories: Vec<Vec<f64>>,
    pub indent_histories: Vec<Vec<Option<u32>>>,
    pub extend_count: usize,
}

/// Search for scaffolds and group the candidates under them.
#[tracing::instrument(level = "debug", skip_all, fields(lines = lines.len(), option = %config.option))]
pub fn search_groups(
    lines: &[Vec<(String, f64)>],
    indent: Option<&[u32]>,
    config: &SearchConfig,
    tables: &Tables,
) -> Result<SearchOutcome, SearchError> {
    if let Some(indent) = indent {
        if indent.len() != lines.len() {
            return Err(SearchError::IndentLength {
                expected: lines.len(),
                found: indent.len(),
            });
        }
    }

    let parseable = filter_parseable(lines, tables);
    let mut outcome = SearchOutcome {
        rejected_mass: parseable.rejected_mass,
        ..SearchOutcome::default()
    };

    if config.option == SearchOption::Base {
        let texts = parseable
            .lines
            .iter()
            .map(|line| line.iter().map(|c| (c.text.clone(), c.cost)).collect())
            .collect();
        outcome.groups = Some(vec![SearchGroup {
            lines: texts,
            configs: vec![None; lines.len()],
            cost: 0.0,
        }]);
        return Ok(outcome);
    }

    let kind = if config.option.tracks_table() {
        ConfigKind::Table
    } else {
        ConfigKind::Syntax
    };
    let configs: Vec<Vec<FrozenConfig>> = parseable
        .lines
        .iter()
        .enumerate()
        .map(|(line, candidates)| {
            let gold = indent.map(|indent| indent[line]);
            candidates
                .iter()
                .map(|c| FrozenConfig::of(&c.signature, kind, gold))
                .collect()
        })
        .collect();

    let steps: Vec<Vec<(LineChoice, f64)>> = match config.mode {
        SearchMode::Hierarchical => configs
            .iter()
            .zip(&parseable.lines)
            .map(|(line_configs, candidates)| {
                let costs = candidates.iter().map(|c| c.cost);
                marginalize(line_configs.iter().cloned().zip(costs))
                    .into_iter()
                    .map(|(line_config, cost)| (LineChoice::config(line_config), cost))
                    .collect()
            })
            .collect(),
        SearchMode::Regular => configs
            .iter()
            .zip(&parseable.lines)
            .map(|(line_configs, candidates)| {
                line_configs
                    .iter()
                    .zip(candidates)
                    .map(|(line_config, c)| (LineChoice::text(&c.text, line_config.clone()), c.cost))
                    .collect()
            })
            .collect(),
    };

    let seed = Candidate::seed(
        config.option.tracks_scope(),
        config.option.tracks_table(),
        tables,
    )?;
    let beam = Beam::run(config.beam_width, seed, &steps);
    outcome.extend_count = beam.extend_count();
    let mut scaffolds = beam.into_terminal();
    scaffolds.truncate(config.top_k);
    tracing::debug!(scaffolds = scaffolds.len(), "search finished");
    if scaffolds.is_empty() {
        return Ok(outcome);
    }

    outcome.rank_histories = scaffolds.iter().map(Candidate::rank_history).collect();
    outcome.cost_histories = scaffolds.iter().map(Candidate::cost_history).collect();
    outcome.indent_histories = scaffolds.iter().map(Candidate::indent_history).collect();

    let groups = scaffolds
        .iter()
        .map(|scaffold| {
            let chosen: Vec<&LineChoice> = scaffold.history().iter().collect();
            let lines = match config.mode {
                SearchMode::Regular => chosen
                    .iter()
                    .zip(scaffold.cost_history())
                    .map(|(choice, cost)| {
                        let text = choice.text.as_deref().unwrap_or_default();
                        vec![(text.to_string(), cost)]
                    })
                    .collect(),
                SearchMode::Hierarchical => chosen
                    .iter()
                    .zip(configs.iter().zip(&parseable.lines))
                    .map(|(choice, (line_configs, candidates))| {
                        line_configs
                            .iter()
                            .zip(candidates)
                            .filter(|(line_config, _)| **line_config == choice.config)
                            .map(|(_, c)| (c.text.clone(), c.cost))
                            .collect()
                    })
                    .collect(),
            };
            SearchGroup {
                lines,
                configs: chosen.iter().map(|choice| Some(choice.config.clone())).collect(),
                cost: scaffold.cost(),
            }
        })
        .collect();
    outcome.groups = Some(groups);
    Ok(outcome)
}

/// Whether a known-good program satisfies the constraints of `option`.
///
/// Each line becomes the only, zero-cost candidate for its line.
pub fn pseudo_compile_check(
    program: &str,
    indent: Option<&[u32]>,
    option: SearchOption,
    tables: &Tables,
) -> Result<bool, SearchError> {
    let lines: Vec<Vec<(String, f64)>> = program
        .lines()
        .map(|line| vec![(line.to_string(), 0.0)])
        .collect();
    let outcome = search_groups(&lines, indent, &SearchConfig::with_option(option), tables)?;
    Ok(outcome.groups.is_some_and(|groups| !groups.is_empty()))
}
