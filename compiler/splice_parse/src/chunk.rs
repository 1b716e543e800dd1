//! Statement fragments.
//!
//! A chunk is one statement without its trailing `;`: an optional `return`,
//! then either a declaration (`type declarators`) or a plain expression.

use crate::{extract_declarations, match_declared_type, parse_expr, ParseError};
use splice_ir::{DeclaredType, ExprArena, ExprId, Tables, Token, TokenKind};
use splice_lexer::filter_space;

/// Parsed statement fragment.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub arena: ExprArena,
    pub roots: Vec<ExprId>,
    /// Declared names in source order. A repeated name keeps its last type.
    pub declared: Vec<(String, DeclaredType)>,
    /// Identifiers referenced by the fragment, first occurrence order,
    /// excluding the names it declares.
    pub used: Vec<String>,
    pub returning: bool,
}

/// Parse one statement fragment.
pub fn parse_chunk(tokens: &[Token], tables: &Tables) -> Result<Chunk, ParseError> {
    let mut tokens = filter_space(tokens);
    let returning = tokens
        .first()
        .is_some_and(|t| t.kind == TokenKind::Identifier && t.text == "return");
    if returning {
        tokens.remove(0);
    }

    let mut arena = ExprArena::new();
    let mut declared = Vec::new();

    // A container name with broken generics fails the whole fragment.
    let decl = match_declared_type(&mut tokens, 0, tables)?;
    let roots = match decl {
        None => parse_expr(&tokens, &mut arena, tables)?,
        Some((ty, end)) => {
            let declarators = &tokens[end + 1..];
            let Some(first) = declarators.first() else {
                return Err(ParseError::MissingDeclarator);
            };
            let decl_roots = parse_expr(declarators, &mut arena, tables)?;
            for &root in &decl_roots {
                for (name, ty) in extract_declarations(&arena, root, &ty) {
                    declared.retain(|(n, _): &(String, DeclaredType)| *n != name);
                    declared.push((name, ty));
                }
            }
            // `T (x)` reads as a functional cast; keep the type in the tree.
            if first.kind == TokenKind::OpenParen {
                parse_expr(&tokens, &mut arena, tables)?
            } else {
                decl_roots
            }
        }
    };

    let mut used: Vec<String> = Vec::new();
    let mut names = Vec::new();
    for &root in &roots {
        arena.collect_identifiers(root, &mut names);
    }
    for name in names {
        if !used.contains(&name) && !declared.iter().any(|(d, _)| *d == name) {
            used.push(name);
        }
    }

    Ok(Chunk {
        arena,
        roots,
        declared,
        used,
        returning,
    })
}
