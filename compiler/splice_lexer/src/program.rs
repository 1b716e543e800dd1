//! Whole-program token index.
//!
//! A [`Program`] tokenizes every line of a source text, numbers the tokens
//! globally and answers queries by 1-based (line, column) position.

use crate::tokenize;
use rustc_hash::FxHashMap;
use splice_ir::{Span, Token, TokenKind, TokenPos};

/// Tokenized program with a position index.
#[derive(Clone, Debug)]
pub struct Program {
    lines: Vec<String>,
    tokens: Vec<Token>,
    /// First token ordinal of each line, plus one trailing entry.
    line_starts: Vec<usize>,
    by_position: FxHashMap<(u32, u32), usize>,
}

impl Program {
    /// Tokenize `source` line by line. Each line ends in a newline
    /// whitespace token.
    pub fn new(source: &str) -> Self {
        let lines: Vec<String> = source.split('\n').map(str::to_string).collect();
        let mut tokens = Vec::new();
        let mut line_starts = Vec::with_capacity(lines.len() + 1);
        let mut by_position = FxHashMap::default();

        for (line_no, line) in lines.iter().enumerate() {
            line_starts.push(tokens.len());
            let line_id = u32::try_from(line_no).unwrap_or(u32::MAX);
            let mut line_tokens = tokenize(line);
            line_tokens.push(Token::new(
                TokenKind::Whitespace,
                "\n",
                Span::from_range(line.len()..line.len()),
            ));
            for mut token in line_tokens {
                let ordinal = tokens.len();
                token.pos = Some(TokenPos {
                    ordinal: u32::try_from(ordinal).unwrap_or(u32::MAX),
                    line: line_id,
                });
                // Later tokens at the same position win (empty literal segments).
                by_position.insert((line_id + 1, token.offset() + 1), ordinal);
                tokens.push(token);
            }
        }
        line_starts.push(tokens.len());

        tracing::debug!(
            lines = lines.len(),
            tokens = tokens.len(),
            "indexed program"
        );

        Program {
            lines,
            tokens,
            line_starts,
            by_position,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every token of the program in order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens of one zero-based line, including its trailing newline.
    pub fn line_tokens(&self, line: usize) -> Option<&[Token]> {
        let start = *self.line_starts.get(line)?;
        let end = *self.line_starts.get(line + 1)?;
        Some(&self.tokens[start..end])
    }

    /// Ordinal of the token starting at 1-based `(line, column)`.
    pub fn ordinal_at(&self, line: u32, column: u32) -> Option<usize> {
        self.by_position.get(&(line, column)).copied()
    }

    /// The token starting at 1-based `(line, column)`.
    pub fn token_at(&self, line: u32, column: u32) -> Option<&Token> {
        self.ordinal_at(line, column).map(|i| &self.tokens[i])
    }

    /// Tokens from the one at `start` through the one at `end`, inclusive.
    /// Positions are 1-based `(line, column)` pairs.
    pub fn span(&self, start: (u32, u32), end: (u32, u32)) -> Option<&[Token]> {
        let first = self.ordinal_at(start.0, start.1)?;
        let last = self.ordinal_at(end.0, end.1)?;
        if first > last {
            return None;
        }
        Some(&self.tokens[first..=last])
    }

    /// Concatenated text of tokens `start..=end` by ordinal, clamped to the
    /// program.
    pub fn span_text(&self, start: usize, end: usize) -> String {
        let end = end.saturating_add(1).min(self.tokens.len());
        if start >= end {
            return String::new();
        }
        self.tokens[start..end]
            .iter()
            .map(|t| t.text.as_str())
            .collect()
    }
}
