//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before string
//! and character literals are exploded into their component tokens.

use logos::Logos;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub(crate) enum RawToken {
    #[regex(r"\s+")]
    Whitespace,

    #[token("<=>")]
    #[token("->*")]
    #[token(".*")]
    #[token(">>=")]
    #[token("<<=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<")]
    #[token(">>")]
    #[token("++")]
    #[token("--")]
    #[token("->")]
    #[token("&&")]
    #[token("||")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("::")]
    #[token("<")]
    #[token(">")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("=")]
    #[token("!")]
    #[token("~")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token(".")]
    #[token(",")]
    #[token("?")]
    #[token(":")]
    #[token("#")]
    #[token("sizeof")]
    #[token("new")]
    #[token("delete")]
    Operator,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_]*")]
    Identifier,

    #[regex(r"[0-9]+(LL|ll)")]
    LongLong,

    #[regex(r"0x[a-f0-9]+")]
    Hex,

    #[regex(r"[0-9]+(\.[0-9]*)?[eE][-+]?[0-9]+")]
    Scientific,

    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"'([^'\\]|\\.)'")]
    Char,

    #[token("{")]
    OpenCurly,
    #[token("}")]
    CloseCurly,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenSquare,
    #[token("]")]
    CloseSquare,
    #[token(";")]
    Semicolon,
}
