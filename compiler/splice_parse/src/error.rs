//! Parse failures.
//!
//! None of these escape [`build_signature`](crate::build_signature): a line
//! that fails anywhere is simply unparseable.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A generic container whose argument list is broken.
    #[error("malformed type: {0}")]
    MalformedType(&'static str),

    #[error("unbalanced brackets")]
    UnbalancedBrackets,

    #[error("{0} expression nodes left after reduction")]
    Unreduced(usize),

    #[error("declared type is not followed by a declarator")]
    MissingDeclarator,

    #[error("not a function header: {0}")]
    NotAHeader(&'static str),

    #[error("bad parameter list: {0}")]
    BadParameter(&'static str),

    #[error("unbalanced braces in line")]
    UnbalancedBraces,

    /// A required grammar atom did not match.
    #[error("required `{0}` missing")]
    MissingAtom(&'static str),

    #[error("malformed for-loop control clause")]
    BadForControl,
}
