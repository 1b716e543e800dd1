//! Search candidates: a machine plus the lines it accepted.

use crate::{FrozenConfig, Hypothesis, Machine, SearchError};
use im::Vector;
use splice_ir::Tables;
use std::sync::Arc;

/// One choice for one line: a config, and the text behind it when the
/// beam runs over texts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineChoice {
    pub config: FrozenConfig,
    pub text: Option<Arc<str>>,
}

impl LineChoice {
    pub fn config(config: FrozenConfig) -> Self {
        LineChoice { config, text: None }
    }

    pub fn text(text: &str, config: FrozenConfig) -> Self {
        LineChoice {
            config,
            text: Some(Arc::from(text)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Candidate<'t> {
    machine: Machine,
    tables: &'t Tables,
    cost: f64,
    history: Vector<LineChoice>,
    ranks: Vector<usize>,
    costs: Vector<f64>,
    indents: Vector<Option<u32>>,
}

impl<'t> Candidate<'t> {
    /// Empty seed.
    pub fn seed(
        track_scope: bool,
        track_table: bool,
        tables: &'t Tables,
    ) -> Result<Self, SearchError> {
        Ok(Candidate {
            machine: Machine::new(track_scope, track_table)?,
            tables,
            cost: 0.0,
            history: Vector::new(),
            ranks: Vector::new(),
            costs: Vector::new(),
            indents: Vector::new(),
        })
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn history(&self) -> &Vector<LineChoice> {
        &self.history
    }

    pub fn rank_history(&self) -> Vec<usize> {
        self.ranks.iter().copied().collect()
    }

    pub fn cost_history(&self) -> Vec<f64> {
        self.costs.iter().copied().collect()
    }

    /// Indentation of every accepted line; `None` for lines outside the
    /// scope structure.
    pub fn indent_history(&self) -> Vec<Option<u32>> {
        self.indents.iter().copied().collect()
    }
}

impl Hypothesis for Candidate<'_> {
    type Input = LineChoice;

    fn extend(&self, input: &LineChoice, cost: f64) -> Option<Self> {
        let mut next = self.clone();
        match next.machine.step(&input.config, self.tables) {
            Ok(indent) => {
                next.cost += cost;
                next.history.push_back(input.clone());
                next.costs.push_back(cost);
                next.indents.push_back(indent);
                Some(next)
            }
            Err(rejection) => {
                tracing::trace!(
                    line = self.history.len(),
                    reason = rejection.description(),
                    config = %input.config,
                    "extension rejected"
                );
                None
            }
        }
    }

    fn cost(&self) -> f64 {
        self.cost
    }

    fn record_rank(&mut self, rank: usize) {
        self.ranks.push_back(rank);
    }

    fn is_terminal(&self) -> bool {
        self.machine.is_balanced()
    }
}
