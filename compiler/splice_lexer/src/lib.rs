//! Line lexer for C++ source lines.
//!
//! Tokenizing never fails: characters no rule matches are skipped. String
//! and character literals are exploded into start, content and end tokens
//! so that [`join_tokens`] reproduces their interior byte for byte.

mod literal;
mod program;
mod raw_token;

use logos::Logos;
use raw_token::RawToken;
use splice_ir::{Span, Token, TokenKind};

pub use program::Program;

/// Tokenize one line of source.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    // Logos reports a failed match over everything it consumed; restart one
    // character later so only the offending character is dropped.
    'restart: while pos < line.len() {
        let mut lexer = RawToken::lexer(&line[pos..]);
        while let Some(result) = lexer.next() {
            let range = lexer.span();
            let start = pos + range.start;
            let end = pos + range.end;
            match result {
                Ok(raw) => push_raw(&mut tokens, raw, &line[start..end], start),
                Err(()) => {
                    let width = line[start..].chars().next().map_or(1, char::len_utf8);
                    tracing::trace!(offset = start, "skipping unmatched character");
                    pos = start + width;
                    continue 'restart;
                }
            }
        }
        break;
    }

    tokens
}

fn push_raw(tokens: &mut Vec<Token>, raw: RawToken, text: &str, start: usize) {
    let span = Span::from_range(start..start + text.len());
    let kind = match raw {
        RawToken::String => {
            explode_string(tokens, text, start);
            return;
        }
        RawToken::Char => {
            let end = start + text.len();
            tokens.push(Token::new(
                TokenKind::StartChar,
                "'",
                Span::from_range(start..start + 1),
            ));
            tokens.push(Token::new(
                TokenKind::InChar,
                &text[1..text.len() - 1],
                Span::from_range(start + 1..end - 1),
            ));
            tokens.push(Token::new(
                TokenKind::EndChar,
                "'",
                Span::from_range(end - 1..end),
            ));
            return;
        }
        RawToken::Identifier => match text {
            "and" => {
                tokens.push(Token::new(TokenKind::Operator, "&&", span));
                return;
            }
            "or" => {
                tokens.push(Token::new(TokenKind::Operator, "||", span));
                return;
            }
            _ => TokenKind::Identifier,
        },
        RawToken::Whitespace => TokenKind::Whitespace,
        RawToken::Operator => TokenKind::Operator,
        RawToken::LongLong => TokenKind::LongLong,
        RawToken::Hex => TokenKind::Hex,
        RawToken::Scientific => TokenKind::Scientific,
        RawToken::Number => TokenKind::Number,
        RawToken::OpenCurly => TokenKind::OpenCurly,
        RawToken::CloseCurly => TokenKind::CloseCurly,
        RawToken::OpenParen => TokenKind::OpenParen,
        RawToken::CloseParen => TokenKind::CloseParen,
        RawToken::OpenSquare => TokenKind::OpenSquare,
        RawToken::CloseSquare => TokenKind::CloseSquare,
        RawToken::Semicolon => TokenKind::Semicolon,
    };
    tokens.push(Token::new(kind, text, span));
}

fn explode_string(tokens: &mut Vec<Token>, text: &str, start: usize) {
    let end = start + text.len();
    tokens.push(Token::new(
        TokenKind::StartQuote,
        "\"",
        Span::from_range(start..start + 1),
    ));
    let contents = &text[1..text.len() - 1];
    for (segment, at) in literal::split_keep_space(contents) {
        let seg_start = start + 1 + at;
        tokens.push(Token::new(
            TokenKind::InQuote,
            segment,
            Span::from_range(seg_start..seg_start + segment.len()),
        ));
    }
    tokens.push(Token::new(
        TokenKind::EndQuote,
        "\"",
        Span::from_range(end - 1..end),
    ));
}

/// Drop whitespace tokens.
pub fn filter_space(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .cloned()
        .collect()
}

/// Join tokens with single spaces, except directly after a literal opener
/// or inside literal contents, and trim the result.
pub fn join_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&token.text);
        if !matches!(
            token.kind,
            TokenKind::InQuote | TokenKind::InChar | TokenKind::StartQuote | TokenKind::StartChar
        ) {
            out.push(' ');
        }
    }
    out.trim().to_string()
}

/// Canonical spacing of a line: tokenize, drop whitespace, join.
///
/// Two lines that differ only in whitespace outside literals normalise to
/// the same text.
pub fn normalize_line(line: &str) -> String {
    join_tokens(&filter_space(&tokenize(line)))
}
