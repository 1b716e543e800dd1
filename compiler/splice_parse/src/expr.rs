//! Bracket matching and group finalization.
//!
//! Tokens are scanned with a stack of open groups. When a group closes it
//! is finalized into one node: a literal for quotes, a type-cast parenthesis
//! when its whole interior is a type, otherwise a group over its reduced
//! interior. The implicit top-level group is finalized the same way.

use crate::match_declared_type;
use crate::reduce::{reduce, Item};
use crate::ParseError;
use splice_ir::{Bracket, DeclaredType, Expr, ExprArena, ExprId, Tables, Token, TokenKind};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum GroupKind {
    Top,
    Quote,
    Char,
    Bracket(Bracket),
}

struct Frame {
    kind: GroupKind,
    closer: Option<TokenKind>,
    items: Vec<Item>,
    /// Direct tokens of the interior, for the type-cast check.
    raw: Vec<Token>,
    nested: bool,
}

impl Frame {
    fn new(kind: GroupKind, closer: Option<TokenKind>) -> Self {
        Frame {
            kind,
            closer,
            items: Vec::new(),
            raw: Vec::new(),
            nested: false,
        }
    }

    fn open(opener: TokenKind) -> Self {
        let kind = match opener {
            TokenKind::StartQuote => GroupKind::Quote,
            TokenKind::StartChar => GroupKind::Char,
            TokenKind::OpenSquare => GroupKind::Bracket(Bracket::Square),
            TokenKind::OpenCurly => GroupKind::Bracket(Bracket::Curly),
            _ => GroupKind::Bracket(Bracket::Paren),
        };
        Frame::new(kind, opener.closer())
    }
}

enum Finished {
    Literal(String),
    Type(DeclaredType),
    Items(Vec<ExprId>),
}

/// Parse a token sequence into its top-level expression roots.
///
/// Whitespace tokens are ignored. A sequence that is exactly one type
/// yields no roots. Fails on unbalanced brackets or when more than one
/// top-level node survives reduction.
pub fn parse_expr(
    tokens: &[Token],
    arena: &mut ExprArena,
    tables: &Tables,
) -> Result<Vec<ExprId>, ParseError> {
    let mut stack = vec![Frame::new(GroupKind::Top, None)];

    for token in tokens.iter().filter(|t| t.kind != TokenKind::Whitespace) {
        if token.kind.is_opener() {
            if let Some(parent) = stack.last_mut() {
                parent.nested = true;
            }
            stack.push(Frame::open(token.kind));
            continue;
        }

        let closes = stack
            .last()
            .is_some_and(|top| top.closer == Some(token.kind));
        if closes && stack.len() > 1 {
            let Some(frame) = stack.pop() else {
                return Err(ParseError::UnbalancedBrackets);
            };
            let id = finish_group(frame, arena, tables);
            if let Some(parent) = stack.last_mut() {
                parent.items.push(Item::Node(id));
            }
            continue;
        }

        let Some(top) = stack.last_mut() else {
            return Err(ParseError::UnbalancedBrackets);
        };
        let in_literal = matches!(top.kind, GroupKind::Quote | GroupKind::Char);
        if token.kind.is_closer() && !in_literal {
            tracing::trace!(closer = %token.text, "mismatched closing bracket");
            return Err(ParseError::UnbalancedBrackets);
        }
        top.raw.push(token.clone());
        if !in_literal {
            top.items.push(leaf(token, arena));
        }
    }

    if stack.len() != 1 {
        tracing::trace!(open = stack.len() - 1, "unterminated bracket group");
        return Err(ParseError::UnbalancedBrackets);
    }
    let Some(top) = stack.pop() else {
        return Err(ParseError::UnbalancedBrackets);
    };
    match finish(top, arena, tables) {
        Finished::Items(roots) if roots.len() > 1 => Err(ParseError::Unreduced(roots.len())),
        Finished::Items(roots) => Ok(roots),
        Finished::Type(_) | Finished::Literal(_) => Ok(Vec::new()),
    }
}

fn leaf(token: &Token, arena: &mut ExprArena) -> Item {
    let expr = match token.kind {
        TokenKind::Operator => return Item::Op(token.text.clone()),
        TokenKind::Identifier => Expr::Ident(token.text.clone()),
        kind if kind.is_literal() => Expr::Literal(token.text.clone()),
        _ => Expr::Punct(token.text.clone()),
    };
    Item::Node(arena.alloc(expr))
}

fn finish_group(frame: Frame, arena: &mut ExprArena, tables: &Tables) -> ExprId {
    let bracket = match frame.kind {
        GroupKind::Bracket(bracket) => bracket,
        GroupKind::Top | GroupKind::Quote | GroupKind::Char => Bracket::Paren,
    };
    let expr = match finish(frame, arena, tables) {
        Finished::Literal(text) => Expr::Literal(text),
        Finished::Type(ty) => Expr::TypeParen(ty),
        Finished::Items(items) => Expr::Group { bracket, items },
    };
    arena.alloc(expr)
}

fn finish(frame: Frame, arena: &mut ExprArena, tables: &Tables) -> Finished {
    match frame.kind {
        GroupKind::Quote => {
            let body: String = frame.raw.iter().map(|t| t.text.as_str()).collect();
            return Finished::Literal(format!("\"{body}\""));
        }
        GroupKind::Char => {
            let body: String = frame.raw.iter().map(|t| t.text.as_str()).collect();
            return Finished::Literal(format!("'{body}'"));
        }
        GroupKind::Top | GroupKind::Bracket(Bracket::Paren) => {
            if let Some(ty) = whole_type(&frame, tables) {
                return Finished::Type(ty);
            }
        }
        GroupKind::Bracket(_) => {}
    }

    let mut items = frame.items;
    reduce(&mut items, arena);
    let nodes = items
        .into_iter()
        .map(|item| match item {
            Item::Node(id) => id,
            Item::Op(symbol) => arena.alloc(Expr::Punct(symbol)),
        })
        .collect();
    Finished::Items(nodes)
}

/// The interior is exactly one type, e.g. `(long long)`.
fn whole_type(frame: &Frame, tables: &Tables) -> Option<DeclaredType> {
    if frame.nested || frame.raw.is_empty() {
        return None;
    }
    let mut raw = frame.raw.clone();
    match match_declared_type(&mut raw, 0, tables) {
        Ok(Some((ty, end))) if end + 1 == raw.len() => Some(ty),
        _ => None,
    }
}
