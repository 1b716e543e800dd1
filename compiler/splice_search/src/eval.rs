//! Judge loop over ranked assemblies.

use crate::{Assembly, EvalConfig};
use rustc_hash::FxHashMap;
use splice_parse::braces_acceptable;
use std::fmt;

/// Verdict for one program text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum JudgeStatus {
    Passed,
    CompilationError,
    ExecutionError,
    TimeLimitExceeded,
    /// Never sent to the judge: the brace pre-check failed.
    BracesRejected,
}

impl JudgeStatus {
    pub const fn name(self) -> &'static str {
        match self {
            JudgeStatus::Passed => "passed",
            JudgeStatus::CompilationError => "compilation error",
            JudgeStatus::ExecutionError => "execution error",
            JudgeStatus::TimeLimitExceeded => "time limit exceeded",
            JudgeStatus::BracesRejected => "braces rejected",
        }
    }

    pub const fn is_passed(self) -> bool {
        matches!(self, JudgeStatus::Passed)
    }
}

impl fmt::Display for JudgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiles and runs a program against its tests.
pub trait Judge {
    fn judge(&mut self, program: &str) -> JudgeStatus;
}

impl<F> Judge for F
where
    F: FnMut(&str) -> JudgeStatus,
{
    fn judge(&mut self, program: &str) -> JudgeStatus {
        self(program)
    }
}

/// One pulled assembly and how it fared.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalRecord {
    /// Zero-based pull order.
    pub rank: usize,
    pub code: String,
    pub status: JudgeStatus,
    /// Whether the gold program passed the constraint check.
    pub gold_passed: bool,
}

/// Pull assemblies until one passes or the budget runs out.
///
/// Brace-invalid texts are recorded as [`JudgeStatus::BracesRejected`]
/// without calling the judge; verdicts are cached per text.
#[tracing::instrument(level = "debug", skip_all, fields(budget = config.budget))]
pub fn evaluate<I, J>(
    source: I,
    judge: &mut J,
    config: &EvalConfig,
    gold_passed: bool,
) -> Vec<EvalRecord>
where
    I: IntoIterator<Item = Assembly>,
    J: Judge + ?Sized,
{
    let mut cache: FxHashMap<String, JudgeStatus> = FxHashMap::default();
    let mut records = Vec::new();

    for (rank, assembly) in source.into_iter().take(config.budget).enumerate() {
        let code = assembly.code;
        let status = if !braces_acceptable(&code) {
            JudgeStatus::BracesRejected
        } else if let Some(&cached) = cache.get(&code) {
            tracing::trace!(rank, "verdict cached");
            cached
        } else {
            let status = judge.judge(&code);
            cache.insert(code.clone(), status);
            status
        };
        tracing::debug!(rank, cost = assembly.cost, %status, "judged");

        records.push(EvalRecord {
            rank,
            code,
            status,
            gold_passed,
        });
        if status.is_passed() {
            break;
        }
    }
    records
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assemblies(codes: &[&str]) -> Vec<Assembly> {
        codes
            .iter()
            .enumerate()
            .map(|(idx, code)| Assembly {
                code: (*code).to_string(),
                cost: idx as f64,
                group: 0,
            })
            .collect()
    }

    struct Counting {
        calls: Vec<String>,
        passing: &'static str,
    }

    impl Judge for Counting {
        fn judge(&mut self, program: &str) -> JudgeStatus {
            self.calls.push(program.to_string());
            if program == self.passing {
                JudgeStatus::Passed
            } else {
                JudgeStatus::CompilationError
            }
        }
    }

    #[test]
    fn stops_at_first_pass() {
        let mut judge = Counting {
            calls: Vec::new(),
            passing: "b;",
        };
        let records = evaluate(
            assemblies(&["a;", "b;", "c;"]),
            &mut judge,
            &EvalConfig::default(),
            true,
        );
        let statuses: Vec<JudgeStatus> = records.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![JudgeStatus::CompilationError, JudgeStatus::Passed]
        );
        assert_eq!(records[1].rank, 1);
        assert!(records.iter().all(|r| r.gold_passed));
    }

    #[test]
    fn brace_invalid_text_skips_judge() {
        let mut judge = Counting {
            calls: Vec::new(),
            passing: "",
        };
        let records = evaluate(
            assemblies(&["}{", "{ x; }"]),
            &mut judge,
            &EvalConfig::default(),
            false,
        );
        assert_eq!(records[0].status, JudgeStatus::BracesRejected);
        assert_eq!(records[1].status, JudgeStatus::CompilationError);
        assert_eq!(judge.calls, vec!["{ x; }".to_string()]);
    }

    #[test]
    fn repeated_text_is_judged_once() {
        let mut judge = Counting {
            calls: Vec::new(),
            passing: "",
        };
        let records = evaluate(
            assemblies(&["a;", "a;", "a;"]),
            &mut judge,
            &EvalConfig::default(),
            true,
        );
        assert_eq!(records.len(), 3);
        assert_eq!(judge.calls.len(), 1);
    }

    #[test]
    fn budget_limits_pulls() {
        let mut judge = |_: &str| JudgeStatus::TimeLimitExceeded;
        let records = evaluate(
            assemblies(&["a;", "b;", "c;"]),
            &mut judge,
            &EvalConfig { budget: 2 },
            true,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].status.to_string(), "time limit exceeded");
    }
}
