//! Function headers and prototypes.

use crate::{match_declared_type, parse_chunk, Chunk, ParseError};
use splice_ir::{DeclaredType, Tables, Token, TokenKind};
use splice_lexer::filter_space;

/// One parameter of a function header.
#[derive(Clone, Debug)]
pub struct Param {
    /// `None` for unnamed parameters, as in prototypes.
    pub name: Option<String>,
    /// Declared type with pointer and array depth applied.
    pub ty: DeclaredType,
    pub by_ref: bool,
    pub default: Option<Chunk>,
}

/// `ret name(params)` optionally followed by `;` or `{`.
#[derive(Clone, Debug)]
pub struct FunctionHeader {
    pub name: String,
    pub return_type: DeclaredType,
    pub params: Vec<Param>,
    pub is_prototype: bool,
}

/// Parse a function definition header or a prototype.
pub fn parse_function_header(tokens: &[Token], tables: &Tables) -> Result<FunctionHeader, ParseError> {
    let mut tokens = filter_space(tokens);
    if tokens.last().is_some_and(|t| t.kind == TokenKind::OpenCurly) {
        tokens.pop();
    }
    if tokens.is_empty() {
        return Err(ParseError::NotAHeader("empty line"));
    }

    let (open, close) = paren_positions(&tokens)?;
    let is_prototype = tokens
        .get(close + 1)
        .is_some_and(|t| t.kind == TokenKind::Semicolon);

    let mut params = parse_params(tokens[open + 1..close].to_vec(), tables)?;
    if params.len() == 1 && params[0].default.is_none() && params[0].ty.base == "void" {
        params.clear();
    }

    let mut header = tokens[..open].to_vec();
    let Some((return_type, end)) = match_declared_type(&mut header, 0, tables)? else {
        return Err(ParseError::NotAHeader("no return type"));
    };
    if header.len() != end + 2 {
        return Err(ParseError::NotAHeader("name must be one token"));
    }
    let name = header[end + 1].text.clone();

    Ok(FunctionHeader {
        name,
        return_type,
        params,
        is_prototype,
    })
}

/// Indices of the only `(` and the only `)`.
fn paren_positions(tokens: &[Token]) -> Result<(usize, usize), ParseError> {
    let mut open = None;
    let mut close = None;
    for (i, token) in tokens.iter().enumerate() {
        let slot = match token.kind {
            TokenKind::OpenParen => &mut open,
            TokenKind::CloseParen => &mut close,
            _ => continue,
        };
        if slot.replace(i).is_some() {
            return Err(ParseError::NotAHeader("more than one parameter list"));
        }
    }
    match (open, close) {
        (Some(open), Some(close)) if open < close => Ok((open, close)),
        _ => Err(ParseError::NotAHeader("no parameter list")),
    }
}

fn parse_params(mut tokens: Vec<Token>, tables: &Tables) -> Result<Vec<Param>, ParseError> {
    let mut params = Vec::new();
    // Decided by the first parameter: either every parameter is named or none is.
    let mut named = None;
    let mut cur = 0;

    while cur < tokens.len() {
        let Some((base, end)) = match_declared_type(&mut tokens, cur, tables)? else {
            return Err(ParseError::BadParameter("parameter type"));
        };
        cur = end;
        let is = |tokens: &[Token], i: usize, text: &str| tokens.get(i).is_some_and(|t| t.text == text);

        let by_ref = is(&tokens, cur + 1, "&");
        if by_ref {
            cur += 1;
        }
        let mut depth = 0;
        while is(&tokens, cur + 1, "*") {
            cur += 1;
            depth += 1;
        }

        let named = *named.get_or_insert_with(|| {
            tokens
                .get(cur + 1)
                .is_some_and(|t| t.kind == TokenKind::Identifier)
        });
        let name = if named {
            cur += 1;
            match tokens.get(cur) {
                Some(t) if t.kind == TokenKind::Identifier => Some(t.text.clone()),
                _ => return Err(ParseError::BadParameter("parameter name")),
            }
        } else {
            None
        };

        while is(&tokens, cur + 1, "[") {
            let Some(offset) = tokens[cur + 2..]
                .iter()
                .position(|t| t.kind == TokenKind::CloseSquare)
            else {
                return Err(ParseError::BadParameter("unclosed array bound"));
            };
            cur = cur + 2 + offset;
            depth += 1;
        }

        let mut default = None;
        if is(&tokens, cur + 1, "=") {
            let start = cur + 2;
            let end = tokens[start.min(tokens.len())..]
                .iter()
                .position(|t| t.is_op(","))
                .map_or(tokens.len(), |offset| start + offset);
            default = Some(parse_chunk(&tokens[start.min(end)..end], tables)?);
            cur = end - 1;
        }

        params.push(Param {
            name,
            ty: base.with_depth(depth),
            by_ref,
            default,
        });

        if cur + 1 < tokens.len() {
            cur += 1;
            if !tokens[cur].is_op(",") {
                return Err(ParseError::BadParameter("expected `,`"));
            }
        }
        cur += 1;
    }
    Ok(params)
}
