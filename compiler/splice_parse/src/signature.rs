//! Line signature builder.

use crate::line::{is_complete, split_statements};
use crate::{
    classify_line, parse_chunk, parse_function_header, Chunk, FunctionHeader, LineShape, ParseError,
};
use splice_ir::{DeclaredName, LineCategory, LineSignature, Tables, TokenKind};
use splice_lexer::{filter_space, normalize_line, tokenize};

/// A signature together with the parsed statements behind it.
#[derive(Clone, Debug)]
pub struct LineAnalysis {
    pub signature: LineSignature,
    /// Each parsed statement with the scope offset of its fragment.
    pub chunks: Vec<(u32, Chunk)>,
}

/// Signature of one candidate line, or `None` if the line is unparseable.
pub fn build_signature(line: &str, tables: &Tables) -> Option<LineSignature> {
    analyze_line(line, tables).map(|analysis| analysis.signature)
}

/// Parse a line fully, keeping the statement trees.
#[tracing::instrument(level = "trace", skip(tables))]
pub fn analyze_line(line: &str, tables: &Tables) -> Option<LineAnalysis> {
    let normalized = normalize_line(line);
    let tokens = filter_space(&tokenize(&normalized));
    let complete = is_complete(&normalized);

    match parse_function_header(&tokens, tables) {
        Ok(header) => {
            let mut signature = header_signature(header, complete);
            signature.starts_with_close = tokens.first().is_some_and(|t| t.kind == TokenKind::CloseCurly);
            signature.ends_with_open = tokens.last().is_some_and(|t| t.kind == TokenKind::OpenCurly);
            return Some(LineAnalysis {
                signature,
                chunks: Vec::new(),
            });
        }
        Err(error) => tracing::trace!(%error, "not a function header"),
    }

    let shape = match classify_line(&normalized) {
        Ok(shape) => shape,
        Err(error) => {
            tracing::trace!(%error, "line does not classify");
            return None;
        }
    };
    match shape_signature(shape, complete, tables) {
        Ok(analysis) => Some(analysis),
        Err(error) => {
            tracing::trace!(%error, "statement does not parse");
            None
        }
    }
}

fn header_signature(header: FunctionHeader, complete: bool) -> LineSignature {
    let category = if header.is_prototype {
        LineCategory::Prototype
    } else {
        LineCategory::Function
    };
    let mut signature = LineSignature::bare(category);
    signature.complete = complete;
    signature.opens_scope = !complete;

    for param in header.params {
        if let Some(name) = param.name {
            signature
                .declared
                .insert(name, DeclaredName { ty: param.ty, depth: 1 });
        }
    }
    signature.declared.insert(
        header.name.clone(),
        DeclaredName {
            ty: header.return_type,
            depth: 0,
        },
    );
    if header.is_prototype {
        signature.prototype = Some(header.name);
    }
    signature
}

fn shape_signature(
    shape: LineShape,
    complete: bool,
    tables: &Tables,
) -> Result<LineAnalysis, ParseError> {
    let mut signature = LineSignature::bare(shape.category);
    signature.opens_scope = shape.opens_scope;
    signature.starts_with_close = shape.starts_with_close;
    signature.ends_with_open = shape.ends_with_open;
    signature.complete = complete;

    let mut chunks = Vec::new();
    for fragment in shape.fragments {
        let tokens = filter_space(&tokenize(&fragment.text));
        for statement in split_statements(&tokens) {
            if statement.is_empty() {
                continue;
            }
            let chunk = parse_chunk(statement, tables)?;
            for (name, ty) in &chunk.declared {
                signature.declared.insert(
                    name.clone(),
                    DeclaredName {
                        ty: ty.clone(),
                        depth: fragment.depth,
                    },
                );
            }
            for name in &chunk.used {
                signature.used.insert(name.clone(), fragment.depth);
            }
            chunks.push((fragment.depth, chunk));
        }
    }
    Ok(LineAnalysis { signature, chunks })
}
