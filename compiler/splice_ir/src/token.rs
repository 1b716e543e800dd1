//! Tokens produced by the line lexer.

use super::Span;
use std::fmt;

/// Lexical category of a token.
///
/// String and character literals are exploded into start, content and end
/// tokens so that spacing inside a literal survives a join.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Whitespace,
    Operator,
    Identifier,
    /// Integer with an `LL`/`ll` suffix: `10LL`
    LongLong,
    /// Lower-case hexadecimal integer: `0xff`
    Hex,
    /// Number with an exponent: `1e9`, `2.5E-3`
    Scientific,
    /// Integer or decimal: `42`, `3.`, `0.5`
    Number,
    StartQuote,
    InQuote,
    EndQuote,
    StartChar,
    InChar,
    EndChar,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    OpenSquare,
    CloseSquare,
    Semicolon,
}

impl TokenKind {
    /// Stable lowercase name, used by the CLI token dump.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Operator => "operator",
            TokenKind::Identifier => "identifier",
            TokenKind::LongLong => "LL",
            TokenKind::Hex => "hexa",
            TokenKind::Scientific => "scientific",
            TokenKind::Number => "number",
            TokenKind::StartQuote => "start-quote",
            TokenKind::InQuote => "in-quote",
            TokenKind::EndQuote => "end-quote",
            TokenKind::StartChar => "start-char",
            TokenKind::InChar => "in-char",
            TokenKind::EndChar => "end-char",
            TokenKind::OpenCurly => "open-curly",
            TokenKind::CloseCurly => "close-curly",
            TokenKind::OpenParen => "open-paren",
            TokenKind::CloseParen => "close-paren",
            TokenKind::OpenSquare => "open-square",
            TokenKind::CloseSquare => "close-square",
            TokenKind::Semicolon => "semicolon",
        }
    }

    /// Tokens that open a bracket group in the expression parser.
    pub const fn is_opener(self) -> bool {
        matches!(
            self,
            TokenKind::StartQuote
                | TokenKind::StartChar
                | TokenKind::OpenCurly
                | TokenKind::OpenParen
                | TokenKind::OpenSquare
        )
    }

    /// Closing bracket of a paren, square or curly group.
    pub const fn is_closer(self) -> bool {
        matches!(
            self,
            TokenKind::CloseParen | TokenKind::CloseSquare | TokenKind::CloseCurly
        )
    }

    /// The closing kind paired with an opener.
    pub const fn closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::StartQuote => Some(TokenKind::EndQuote),
            TokenKind::StartChar => Some(TokenKind::EndChar),
            TokenKind::OpenCurly => Some(TokenKind::CloseCurly),
            TokenKind::OpenParen => Some(TokenKind::CloseParen),
            TokenKind::OpenSquare => Some(TokenKind::CloseSquare),
            _ => None,
        }
    }

    /// Kinds that stand for a literal value.
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::LongLong | TokenKind::Hex | TokenKind::Scientific | TokenKind::Number
        )
    }

    /// Content of a string or character literal.
    pub const fn is_quoted(self) -> bool {
        matches!(self, TokenKind::InQuote | TokenKind::InChar)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a token inside a whole tokenized program.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TokenPos {
    /// Index in the program-wide token sequence.
    pub ordinal: u32,
    /// Zero-based line the token belongs to.
    pub line: u32,
}

/// A token with its text and location in the line it came from.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    /// Only set when the token was produced by tokenizing a whole program.
    pub pos: Option<TokenPos>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
            pos: None,
        }
    }

    /// Byte offset of the token within its line.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.span.start
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Operator token with exactly this spelling.
    #[inline]
    pub fn is_op(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }

    /// Identifier token with exactly this spelling. Keywords are identifiers.
    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == word
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) @ {}", self.kind, self.text, self.span)
    }
}
