//! Declaration extractor.

use splice_ir::{BinaryOp, DeclaredType, Expr, ExprArena, ExprId, UnaryOp};

/// Names declared by a declaration expression, in source order.
///
/// `root` is the tree parsed from the tokens after the declared type, e.g.
/// `*p = nullptr, a[10][20], v(n)`. Each comma segment loses its
/// initializer, counts one level of depth per leading `*` and per trailing
/// subscript, and drops a constructor call.
pub fn extract_declarations(
    arena: &ExprArena,
    root: ExprId,
    ty: &DeclaredType,
) -> Vec<(String, DeclaredType)> {
    let mut segments = Vec::new();
    let mut node = root;
    while let Expr::Binary {
        op: BinaryOp::Comma,
        left,
        right,
    } = arena.get(node)
    {
        segments.push(*right);
        node = *left;
    }
    segments.push(node);
    segments.reverse();

    segments
        .into_iter()
        .filter_map(|segment| declarator(arena, segment))
        .map(|(name, depth)| (name, ty.with_depth(depth)))
        .collect()
}

fn declarator(arena: &ExprArena, segment: ExprId) -> Option<(String, u32)> {
    let mut target = segment;
    if let Expr::Binary {
        op: BinaryOp::Assign,
        left,
        ..
    } = arena.get(target)
    {
        target = *left;
    }

    let mut depth = 0;
    while let Expr::Unary {
        op: UnaryOp::Deref,
        operand,
        postfix: false,
    } = arena.get(target)
    {
        target = *operand;
        depth += 1;
    }
    while let Expr::Subscript { base, .. } = arena.get(target) {
        target = *base;
        depth += 1;
    }
    if let Expr::Call { callee, .. } = arena.get(target) {
        target = *callee;
    }

    match arena.get(target) {
        Expr::Ident(name) => Some((name.clone(), depth)),
        Expr::Group { items, .. } => match items.first().map(|&id| arena.get(id)) {
            Some(Expr::Ident(name)) => Some((name.clone(), depth)),
            _ => None,
        },
        _ => None,
    }
}
