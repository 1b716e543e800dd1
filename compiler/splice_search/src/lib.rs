//! Splice Search - constrained assembly of whole programs from per-line candidates.
//!
//! # Architecture
//!
//! - `freeze`: signatures reduced to hashable [`FrozenConfig`]s
//! - `machine`: the scope stack every accepted line must keep consistent
//! - `table`: persistent symbol table for declare-before-use checks
//! - `beam`: generic width-bounded search over [`Hypothesis`] values
//! - `search`: scaffold search and regrouping of candidate texts
//! - `pq`: lazy cost-ordered enumeration of assemblies
//! - `eval`: judge loop over the enumerated assemblies
//!
//! Rejections are values; only [`SearchError`] leaves this crate.

mod beam;
mod candidate;
mod config;
mod error;
mod eval;
mod freeze;
mod machine;
mod pq;
mod search;
mod table;

pub use beam::{Beam, Hypothesis};
pub use candidate::{Candidate, LineChoice};
pub use config::{EvalConfig, SearchConfig, SearchMode, SearchOption};
pub use error::SearchError;
pub use eval::{evaluate, EvalRecord, Judge, JudgeStatus};
pub use freeze::{
    freeze, project, syntax_config_from_str, unfreeze, validate_syntax_config, ConfigKind,
    FrozenConfig, Projection, TableFields,
};
pub use machine::{Machine, Rejection, ScopeFrame};
pub use pq::{Assembly, GroupQueue, MultiQueue};
pub use search::{
    filter_parseable, marginalize, pseudo_compile_check, search_groups, ParsedCandidate,
    Parseable, SearchGroup, SearchOutcome,
};
pub use table::{Binding, SymbolTable};
