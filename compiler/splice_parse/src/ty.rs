//! Declared-type matcher.
//!
//! Recognises the type prefix of a declaration: optional `static`, `const`
//! and `inline`, then either a primitive spelling or a generic container
//! with its arguments. A `>>` that closes two nested generics is split into
//! two `>` tokens in place, which is why the matcher takes `&mut Vec<Token>`.

use crate::ParseError;
use splice_ir::{DeclaredType, Span, Tables, Token, TokenKind};

/// `Ok(None)` is a plain miss; `Err` means the tokens start like a type but
/// the generic argument list is broken.
pub type TypeMatch = Result<Option<(DeclaredType, usize)>, ParseError>;

/// Match a declared type starting at `start`.
///
/// On success returns the type and the index of the last token consumed.
pub fn match_declared_type(tokens: &mut Vec<Token>, start: usize, tables: &Tables) -> TypeMatch {
    match tokens.get(start) {
        None => return Ok(None),
        Some(token) if token.kind == TokenKind::InQuote => return Ok(None),
        Some(_) => {}
    }

    let mut ty = DeclaredType::default();
    let mut cur = start;
    if text_at(tokens, cur) == Some("static") {
        ty.is_static = true;
        cur += 1;
    }
    if text_at(tokens, cur) == Some("const") {
        ty.is_const = true;
        cur += 1;
    }
    if text_at(tokens, cur) == Some("inline") {
        ty.is_inline = true;
        cur += 1;
    }
    let Some(word) = text_at(tokens, cur) else {
        return Ok(None);
    };

    for spelling in tables.primitives() {
        if matches_words(tokens, spelling, cur) {
            let mut end = cur + spelling.len() - 1;
            if text_at(tokens, end + 1) == Some("const") {
                ty.is_const = true;
                end += 1;
            }
            ty.base = normalize_primitive(spelling);
            return Ok(Some((ty, end)));
        }
    }

    let Some(arity) = tables.container_arity(word) else {
        return Ok(None);
    };
    ty.base = word.to_string();
    if text_at(tokens, cur + 1) != Some("<") {
        return Err(ParseError::MalformedType("expected `<` after container"));
    }
    cur += 2;
    for i in 0..arity {
        let Some((arg, end)) = match_declared_type(tokens, cur, tables)? else {
            return Err(ParseError::MalformedType("container argument is not a type"));
        };
        ty.args.push(arg);
        cur = end + 1;
        if i + 1 != arity {
            if text_at(tokens, cur) != Some(",") {
                return Err(ParseError::MalformedType("expected `,` between arguments"));
            }
            cur += 1;
        }
    }

    if text_at(tokens, cur) == Some(">>") {
        split_shift(tokens, cur);
    }
    if text_at(tokens, cur) != Some(">") {
        return Err(ParseError::MalformedType("expected `>` after arguments"));
    }

    if text_at(tokens, cur + 1) == Some("::") {
        cur += 2;
        if text_at(tokens, cur) != Some("iterator") {
            return Err(ParseError::MalformedType("only `::iterator` may follow a container"));
        }
        ty.is_iterator = true;
    }
    Ok(Some((ty, cur)))
}

/// Canonical spelling of a primitive type.
///
/// `unsigned` and `int64_t` become `int`, anything ending in `double`
/// becomes `double`, a leading `signed`/`unsigned` is dropped and so is a
/// redundant trailing `int`.
pub fn normalize_primitive(words: &[&str]) -> String {
    match words {
        ["unsigned"] | ["int64_t"] => return "int".to_string(),
        [.., "double"] => return "double".to_string(),
        _ => {}
    }
    let mut words = words;
    if let ["signed" | "unsigned", rest @ ..] = words {
        words = rest;
    }
    if let [rest @ .., "int"] = words {
        if !rest.is_empty() {
            words = rest;
        }
    }
    words.join(" ")
}

fn text_at(tokens: &[Token], idx: usize) -> Option<&str> {
    tokens.get(idx).map(|t| t.text.as_str())
}

fn matches_words(tokens: &[Token], words: &[&str], start: usize) -> bool {
    words
        .iter()
        .enumerate()
        .all(|(i, word)| text_at(tokens, start + i) == Some(*word))
}

/// Replace the `>>` at `idx` with two `>` tokens.
fn split_shift(tokens: &mut Vec<Token>, idx: usize) {
    let mut first = tokens[idx].clone();
    let span = first.span;
    first.text = ">".to_string();
    first.span = Span::new(span.start, span.start + 1);
    let mut second = first.clone();
    second.span = Span::new(span.start + 1, span.end);
    tokens[idx] = second;
    tokens.insert(idx, first);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
