//! Configuration errors.
//!
//! These are the only failures that leave the search layer. A rejected
//! extension or an exhausted beam is a normal outcome, not an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("symbol table checks need scope tracking")]
    TableWithoutScope,

    #[error("gold indentation has {found} entries for {expected} lines")]
    IndentLength { expected: usize, found: usize },

    #[error("unknown search option `{0}` (expected base, syntax or semantics)")]
    UnknownOption(String),

    #[error("unknown search mode `{0}` (expected hierarchical or regular)")]
    UnknownMode(String),
}
