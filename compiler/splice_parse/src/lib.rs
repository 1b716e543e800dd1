//! Parsing layer: from one line of C++ to a [`LineSignature`].
//!
//! The pipeline for a single line is
//! 1. [`parse_function_header`] for function definitions and prototypes,
//! 2. otherwise [`classify_line`] splits the line into statement fragments,
//! 3. each fragment goes through [`parse_chunk`], which uses the type
//!    matcher, the bracket/precedence parser and the declaration extractor.
//!
//! Every stage reports [`ParseError`]s; [`build_signature`] absorbs them into
//! `None`, so callers only ever see "parseable" or "unparseable".
//!
//! [`LineSignature`]: splice_ir::LineSignature

mod braces;
mod chunk;
mod decl;
mod error;
mod expr;
mod header;
mod line;
mod reduce;
mod signature;
mod ty;

pub use braces::{braces_acceptable, check_braces, extra_braces, ExtraBraces};
pub use chunk::{parse_chunk, Chunk};
pub use decl::extract_declarations;
pub use error::ParseError;
pub use expr::parse_expr;
pub use header::{parse_function_header, FunctionHeader, Param};
pub use line::{classify_line, Fragment, LineShape};
pub use signature::{analyze_line, build_signature, LineAnalysis};
pub use ty::{match_declared_type, normalize_primitive, TypeMatch};
