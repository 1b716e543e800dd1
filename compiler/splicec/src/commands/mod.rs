//! Command handlers for the Splice CLI.
//!
//! Each submodule implements one subcommand. Shared pieces (`CliError`,
//! `read_file` and flag parsing) live in the module root.

use splice_search::SearchError;
use thiserror::Error;

mod check;
mod debug;
mod search;

pub use check::check_program;
pub use debug::{lex_file, parse_file, signature_file};
pub use search::search_candidates;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid candidate file '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid indentation entry `{0}`")]
    BadIndent(String),

    #[error("invalid value `{value}` for {flag}")]
    BadFlag { flag: &'static str, value: String },

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error("missing input file")]
    MissingPath,

    #[error("'{path}' does not satisfy the {option} constraints")]
    GoldRejected { path: String, option: String },

    #[error(transparent)]
    Search(#[from] SearchError),
}

pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}

fn parse_count(flag: &'static str, value: &str) -> Result<usize, CliError> {
    value.parse().map_err(|_| CliError::BadFlag {
        flag,
        value: value.to_string(),
    })
}
