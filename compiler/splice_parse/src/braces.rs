//! Curly-brace bookkeeping over lines and whole programs.

use splice_ir::{Token, TokenKind};
use splice_lexer::{filter_space, tokenize};
use std::collections::BTreeMap;

/// Braces a line leaves unmatched.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ExtraBraces {
    /// Unmatched `}` as the first token.
    pub extra_close: bool,
    /// Unmatched `{` as the last token.
    pub extra_open: bool,
    /// The line is a label (`name:`), which brace checks skip.
    pub is_label: bool,
}

/// Brace counter over the whole text never drops below zero and ends at zero.
pub fn braces_acceptable(program: &str) -> bool {
    let mut counter = 0i64;
    for token in tokenize(program) {
        match token.kind {
            TokenKind::OpenCurly => counter += 1,
            TokenKind::CloseCurly => counter -= 1,
            _ => {}
        }
        if counter < 0 {
            return false;
        }
    }
    counter == 0
}

fn is_label(tokens: &[Token]) -> bool {
    match tokens {
        [.., last] if last.is_op(":") => true,
        [.., colon, last] => colon.is_op(":") && last.kind == TokenKind::Semicolon,
        _ => false,
    }
}

/// Unmatched braces of one line.
///
/// `None` when an unmatched brace sits anywhere but the two ends.
pub fn extra_braces(line: &str) -> Option<ExtraBraces> {
    let tokens = filter_space(&tokenize(line));
    if is_label(&tokens) {
        return Some(ExtraBraces {
            is_label: true,
            ..ExtraBraces::default()
        });
    }

    let mut stack: Vec<(usize, TokenKind)> = Vec::new();
    for (idx, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::OpenCurly => stack.push((idx, token.kind)),
            TokenKind::CloseCurly => {
                if stack.last().is_some_and(|(_, kind)| *kind == TokenKind::OpenCurly) {
                    stack.pop();
                } else {
                    stack.push((idx, token.kind));
                }
            }
            _ => {}
        }
    }

    let mut extra = ExtraBraces::default();
    for (idx, kind) in stack {
        if kind == TokenKind::CloseCurly && idx == 0 {
            extra.extra_close = true;
        } else if kind == TokenKind::OpenCurly && idx + 1 == tokens.len() {
            extra.extra_open = true;
        } else {
            return None;
        }
    }
    Some(extra)
}

/// Lines sharing an indentation level must hand braces to each other: a
/// line ending in `{` is followed at its level by one starting with `}`.
pub fn check_braces<S: AsRef<str>>(lines: &[S], indent: &[u32]) -> bool {
    let mut by_level: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    for (line, level) in lines.iter().zip(indent) {
        by_level.entry(*level).or_default().push(line.as_ref());
    }

    for (level, level_lines) in by_level {
        let mut infos = Vec::with_capacity(level_lines.len());
        for line in level_lines {
            match extra_braces(line) {
                Some(info) if info.is_label => {}
                Some(info) => infos.push(info),
                None => return false,
            }
        }
        let (Some(first), Some(last)) = (infos.first(), infos.last()) else {
            continue;
        };
        if first.extra_close || last.extra_open {
            tracing::debug!(indent = level, "brace left open at indentation level");
            return false;
        }
        if infos.windows(2).any(|w| w[0].extra_open != w[1].extra_close) {
            return false;
        }
    }
    true
}
