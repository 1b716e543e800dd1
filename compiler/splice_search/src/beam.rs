//! Generic top-K beam.

use std::cmp::Ordering;

/// A partial solution the beam can extend one step at a time.
pub trait Hypothesis: Sized {
    type Input;

    /// Extend a copy of `self` with `input` at `cost`, or `None` if the
    /// input is not acceptable here.
    fn extend(&self, input: &Self::Input, cost: f64) -> Option<Self>;

    /// Cumulative cost; lower is better.
    fn cost(&self) -> f64;

    /// Called with the survivor's position after every step.
    fn record_rank(&mut self, rank: usize);

    fn is_terminal(&self) -> bool;
}

pub struct Beam<H> {
    width: usize,
    live: Vec<H>,
    steps: usize,
    extend_count: usize,
}

fn by_cost(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

impl<H: Hypothesis> Beam<H> {
    pub fn new(width: usize, seed: H) -> Self {
        Beam {
            width,
            live: vec![seed],
            steps: 0,
            extend_count: 0,
        }
    }

    /// Run a beam over every step in order.
    pub fn run(width: usize, seed: H, steps: &[Vec<(H::Input, f64)>]) -> Self {
        let mut beam = Beam::new(width, seed);
        for inputs in steps {
            beam.step(inputs);
        }
        beam
    }

    /// Advance every live hypothesis by one of `inputs`.
    ///
    /// Inputs are tried cheapest first; each hypothesis may produce at most
    /// `width` extensions, and the `width` cheapest extensions survive.
    pub fn step(&mut self, inputs: &[(H::Input, f64)]) {
        let mut order: Vec<&(H::Input, f64)> = inputs.iter().collect();
        order.sort_by(|a, b| by_cost(a.1, b.1));

        let mut made = vec![0usize; self.live.len()];
        let mut next = Vec::new();
        for (input, cost) in order {
            for (idx, hypothesis) in self.live.iter().enumerate() {
                if made[idx] >= self.width {
                    continue;
                }
                self.extend_count += 1;
                if let Some(extended) = hypothesis.extend(input, *cost) {
                    next.push(extended);
                    made[idx] += 1;
                }
            }
        }

        next.sort_by(|a, b| by_cost(a.cost(), b.cost()));
        next.truncate(self.width);
        for (rank, hypothesis) in next.iter_mut().enumerate() {
            hypothesis.record_rank(rank);
        }
        self.steps += 1;
        tracing::debug!(
            step = self.steps,
            inputs = inputs.len(),
            live = next.len(),
            "beam step"
        );
        self.live = next;
    }

    /// Hypotheses alive after the last step, cheapest first.
    pub fn live(&self) -> &[H] {
        &self.live
    }

    /// Number of extension attempts made so far.
    pub fn extend_count(&self) -> usize {
        self.extend_count
    }

    /// Terminal survivors, cheapest first.
    pub fn into_terminal(self) -> Vec<H> {
        self.live.into_iter().filter(H::is_terminal).collect()
    }
}
