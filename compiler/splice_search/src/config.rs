//! Search and evaluation settings.

use crate::SearchError;
use std::fmt;
use std::str::FromStr;

/// Which constraints the search enforces.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum SearchOption {
    /// No constraint: every parseable candidate is kept.
    Base,
    /// Scope stack only.
    #[default]
    Syntax,
    /// Scope stack and symbol table.
    Semantics,
}

impl SearchOption {
    pub const fn name(self) -> &'static str {
        match self {
            SearchOption::Base => "base",
            SearchOption::Syntax => "syntax",
            SearchOption::Semantics => "semantics",
        }
    }

    pub const fn tracks_scope(self) -> bool {
        !matches!(self, SearchOption::Base)
    }

    pub const fn tracks_table(self) -> bool {
        matches!(self, SearchOption::Semantics)
    }
}

impl FromStr for SearchOption {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(SearchOption::Base),
            "syntax" => Ok(SearchOption::Syntax),
            "semantics" => Ok(SearchOption::Semantics),
            other => Err(SearchError::UnknownOption(other.to_string())),
        }
    }
}

impl fmt::Display for SearchOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the beam walks the lines.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum SearchMode {
    /// Beam over marginalized configs, then regroup the texts per scaffold.
    #[default]
    Hierarchical,
    /// Beam over the candidate texts themselves.
    Regular,
}

impl FromStr for SearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hierarchical" => Ok(SearchMode::Hierarchical),
            "regular" => Ok(SearchMode::Regular),
            other => Err(SearchError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub option: SearchOption,
    /// Live candidates kept per step, and extensions allowed per candidate.
    pub beam_width: usize,
    /// Terminal scaffolds kept after the last step.
    pub top_k: usize,
    pub mode: SearchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            option: SearchOption::default(),
            beam_width: 50,
            top_k: 20,
            mode: SearchMode::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_option(option: SearchOption) -> Self {
        SearchConfig {
            option,
            ..SearchConfig::default()
        }
    }
}

/// Settings for the judge loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum number of assemblies pulled.
    pub budget: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig { budget: 100 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_parsing() {
        for option in [SearchOption::Base, SearchOption::Syntax, SearchOption::Semantics] {
            assert_eq!(option.name().parse::<SearchOption>(), Ok(option));
        }
        assert_eq!(
            "types".parse::<SearchOption>(),
            Err(SearchError::UnknownOption("types".to_string()))
        );
    }

    #[test]
    fn test_option_constraints() {
        assert!(!SearchOption::Base.tracks_scope());
        assert!(SearchOption::Syntax.tracks_scope());
        assert!(!SearchOption::Syntax.tracks_table());
        assert!(SearchOption::Semantics.tracks_table());
    }

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.beam_width, 50);
        assert_eq!(config.top_k, 20);
        assert_eq!(config.mode, SearchMode::Hierarchical);
        assert_eq!(EvalConfig::default().budget, 100);
        assert_eq!("regular".parse::<SearchMode>(), Ok(SearchMode::Regular));
    }
}
