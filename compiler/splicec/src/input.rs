//! Candidate and indentation file formats.

use crate::commands::CliError;
use serde::Deserialize;

/// `{ "lines": [[["text", cost], ...], ...], "indent": [..] }`
#[derive(Debug, Deserialize, PartialEq)]
pub struct CandidateFile {
    pub lines: Vec<Vec<(String, f64)>>,
    #[serde(default)]
    pub indent: Option<Vec<u32>>,
}

impl CandidateFile {
    pub fn parse(text: &str, path: &str) -> Result<Self, CliError> {
        serde_json::from_str(text).map_err(|source| CliError::Json {
            path: path.to_string(),
            source,
        })
    }
}

/// Whitespace-separated indentation levels, one per program line.
pub fn parse_indent(text: &str) -> Result<Vec<u32>, CliError> {
    text.split_whitespace()
        .map(|word| {
            word.parse()
                .map_err(|_| CliError::BadIndent(word.to_string()))
        })
        .collect()
}
