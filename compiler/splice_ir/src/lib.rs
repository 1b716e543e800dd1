//! Splice IR - shared data types for the line-search pipeline.
//!
//! This crate holds the plain data that flows between the stages:
//! - Spans and tokens produced by the lexer
//! - Declared types recognised by the type matcher
//! - The arena-allocated expression forest built by the parser
//! - Line signatures and their categories
//! - The static vocabulary tables (primitive types, containers, implicit names)
//!
//! Nothing here performs lexing, parsing or search. Those live in
//! `splice_lexer`, `splice_parse` and `splice_search` respectively.

mod expr;
mod operators;
mod signature;
mod span;
mod tables;
mod token;
mod ty;

pub use expr::{Bracket, Expr, ExprArena, ExprId};
pub use operators::{BinaryOp, UnaryOp};
pub use signature::{DeclaredName, LineCategory, LineSignature};
pub use span::Span;
pub use tables::Tables;
pub use token::{Token, TokenKind, TokenPos};
pub use ty::DeclaredType;
