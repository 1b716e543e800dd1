//! Lazy enumeration of whole-program assemblies in cost order.
//!
//! Each [`GroupQueue`] walks the choice lattice of one group: an assembly
//! picks one candidate per line, the seed picks the best of every line, and
//! popping an assembly offers its neighbours that advance exactly one line
//! by one candidate. [`MultiQueue`] merges the groups by peeking at each.

use crate::SearchGroup;
use rustc_hash::FxHashSet;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// One whole-program choice.
#[derive(Clone, Debug, PartialEq)]
pub struct Assembly {
    /// Per-line texts joined with `\n`.
    pub code: String,
    pub cost: f64,
    /// Index of the group it came from.
    pub group: usize,
}

#[derive(Clone, Debug)]
struct Pending {
    cost: f64,
    choice: Box<[usize]>,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.choice.cmp(&other.choice))
    }
}

/// Cost-ordered enumerator over one group.
#[derive(Debug)]
pub struct GroupQueue {
    /// Per line, `(text, cost)` sorted by cost.
    lines: Vec<Vec<(String, f64)>>,
    heap: BinaryHeap<Reverse<Pending>>,
    visited: FxHashSet<Box<[usize]>>,
    base_cost: f64,
}

impl GroupQueue {
    pub fn new(group: &SearchGroup) -> Self {
        let lines: Vec<Vec<(String, f64)>> = group
            .lines
            .iter()
            .map(|line| {
                let mut line = line.clone();
                line.sort_by(|a, b| a.1.total_cmp(&b.1));
                line
            })
            .collect();

        let mut heap = BinaryHeap::new();
        let mut visited = FxHashSet::default();
        if lines.iter().all(|line| !line.is_empty()) {
            let seed: Box<[usize]> = vec![0; lines.len()].into_boxed_slice();
            let cost = lines.iter().map(|line| line[0].1).sum();
            visited.insert(seed.clone());
            heap.push(Reverse(Pending { cost, choice: seed }));
        }
        GroupQueue {
            lines,
            heap,
            visited,
            base_cost: group.cost,
        }
    }

    /// Number of distinct assemblies in the group.
    pub fn size(&self) -> usize {
        self.lines
            .iter()
            .fold(1usize, |acc, line| acc.saturating_mul(line.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Cost of the next assembly, `None` once exhausted.
    pub fn peek_cost(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(p)| p.cost)
    }

    /// The scaffold cost this group was found at.
    pub fn base_cost(&self) -> f64 {
        self.base_cost
    }

    /// The cheapest remaining assembly as `(code, cost)`.
    pub fn pop(&mut self) -> Option<(String, f64)> {
        let Reverse(Pending { cost, choice }) = self.heap.pop()?;

        for line in 0..self.lines.len() {
            let next_idx = choice[line] + 1;
            let Some((_, next_cost)) = self.lines[line].get(next_idx) else {
                continue;
            };
            let mut next = choice.clone();
            next[line] = next_idx;
            if !self.visited.insert(next.clone()) {
                continue;
            }
            let delta = next_cost - self.lines[line][choice[line]].1;
            self.heap.push(Reverse(Pending {
                cost: cost + delta,
                choice: next,
            }));
        }

        let code = choice
            .iter()
            .zip(&self.lines)
            .map(|(&idx, line)| line[idx].0.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Some((code, cost))
    }
}

/// Cost-ordered enumerator across several groups.
#[derive(Debug)]
pub struct MultiQueue {
    queues: Vec<GroupQueue>,
    /// Rank groups by scaffold cost plus assembly cost.
    use_base_cost: bool,
}

impl MultiQueue {
    pub fn new(groups: &[SearchGroup]) -> Self {
        MultiQueue {
            queues: groups.iter().map(GroupQueue::new).collect(),
            use_base_cost: false,
        }
    }

    #[must_use]
    pub fn with_base_cost(mut self, use_base_cost: bool) -> Self {
        self.use_base_cost = use_base_cost;
        self
    }

    /// Total number of assemblies across all groups.
    pub fn size(&self) -> usize {
        self.queues
            .iter()
            .fold(0usize, |acc, q| acc.saturating_add(q.size()))
    }

    fn ranking_cost(&self, queue: &GroupQueue) -> Option<f64> {
        let cost = queue.peek_cost()?;
        Some(if self.use_base_cost {
            cost + queue.base_cost()
        } else {
            cost
        })
    }
}

impl Iterator for MultiQueue {
    type Item = Assembly;

    fn next(&mut self) -> Option<Assembly> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, queue) in self.queues.iter().enumerate() {
            let Some(cost) = self.ranking_cost(queue) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((_, best_cost)) => cost < best_cost,
            };
            if better {
                best = Some((idx, cost));
            }
        }

        let (group, _) = best?;
        let (code, cost) = self.queues[group].pop()?;
        tracing::trace!(group, cost, "assembly popped");
        Some(Assembly { code, cost, group })
    }
}
