//! Flat expression forest.
//!
//! Nodes live in an [`ExprArena`] and refer to each other by [`ExprId`].
//! A parse produces a few top-level roots; identifier collection walks
//! them without recursion into string literals or type casts.

use super::{BinaryOp, DeclaredType, UnaryOp};
use std::fmt::{self, Write as _};

/// Index into an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Bracket flavour of a group node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Bracket {
    Paren,
    Square,
    Curly,
}

impl Bracket {
    pub const fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Bracket::Paren => ("(", ")"),
            Bracket::Square => ("[", "]"),
            Bracket::Curly => ("{", "}"),
        }
    }
}

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Expr {
    /// Number, string or character literal.
    Literal(String),
    Ident(String),
    /// Any other leaf the reducer could not attach: stray operators,
    /// unmatched closers, semicolons.
    Punct(String),
    /// Bracketed group whose interior has been reduced.
    Group { bracket: Bracket, items: Vec<ExprId> },
    /// Parenthesised group that spells exactly one type, e.g. `(int)`.
    TypeParen(DeclaredType),
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
        postfix: bool,
    },
    Ternary {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    /// `callee(args)`; `args` is a paren group.
    Call { callee: ExprId, args: ExprId },
    /// `base[index]`; `index` is a square group.
    Subscript { base: ExprId, index: ExprId },
    Cast { ty: DeclaredType, operand: ExprId },
}

/// Arena owning every node of one parse.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        ExprArena::default()
    }

    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let index = u32::try_from(self.exprs.len()).unwrap_or(u32::MAX);
        self.exprs.push(expr);
        ExprId::new(index)
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Group node of the given bracket flavour.
    pub fn is_group(&self, id: ExprId, bracket: Bracket) -> bool {
        matches!(self.get(id), Expr::Group { bracket: b, .. } if *b == bracket)
    }

    pub fn is_type_paren(&self, id: ExprId) -> bool {
        matches!(self.get(id), Expr::TypeParen(_))
    }

    /// Append the identifiers referenced by `id` to `out`, in source order.
    ///
    /// Cast targets and the member side of `.`, `->` and `::` are skipped.
    pub fn collect_identifiers(&self, id: ExprId, out: &mut Vec<String>) {
        match self.get(id) {
            Expr::Ident(name) => out.push(name.clone()),
            Expr::Literal(_) | Expr::Punct(_) | Expr::TypeParen(_) => {}
            Expr::Group { items, .. } => {
                for &item in items {
                    self.collect_identifiers(item, out);
                }
            }
            Expr::Binary { op, left, right } => {
                self.collect_identifiers(*left, out);
                if !op.selects_member() {
                    self.collect_identifiers(*right, out);
                }
            }
            Expr::Unary { operand, .. } | Expr::Cast { operand, .. } => {
                self.collect_identifiers(*operand, out);
            }
            Expr::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                self.collect_identifiers(*cond, out);
                self.collect_identifiers(*then_branch, out);
                self.collect_identifiers(*else_branch, out);
            }
            Expr::Call { callee, args } => {
                self.collect_identifiers(*callee, out);
                self.collect_identifiers(*args, out);
            }
            Expr::Subscript { base, index } => {
                self.collect_identifiers(*base, out);
                self.collect_identifiers(*index, out);
            }
        }
    }

    /// Render a node as an S-expression, e.g. `(= a (+ b (* c d)))`.
    pub fn sexpr(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.write_sexpr(id, &mut out);
        out
    }

    fn write_sexpr(&self, id: ExprId, out: &mut String) {
        match self.get(id) {
            Expr::Literal(text) | Expr::Ident(text) | Expr::Punct(text) => out.push_str(text),
            Expr::TypeParen(ty) => {
                let _ = write!(out, "(type {ty})");
            }
            Expr::Group { bracket, items } => {
                let (open, close) = bracket.delimiters();
                out.push_str(open);
                for (i, &item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    self.write_sexpr(item, out);
                }
                out.push_str(close);
            }
            Expr::Binary { op, left, right } => {
                let _ = write!(out, "({op} ");
                self.write_sexpr(*left, out);
                out.push(' ');
                self.write_sexpr(*right, out);
                out.push(')');
            }
            Expr::Unary {
                op,
                operand,
                postfix,
            } => {
                let _ = write!(out, "({}{op} ", if *postfix { "post" } else { "" });
                self.write_sexpr(*operand, out);
                out.push(')');
            }
            Expr::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                out.push_str("(? ");
                self.write_sexpr(*cond, out);
                out.push(' ');
                self.write_sexpr(*then_branch, out);
                out.push(' ');
                self.write_sexpr(*else_branch, out);
                out.push(')');
            }
            Expr::Call { callee, args } => {
                out.push_str("(call ");
                self.write_sexpr(*callee, out);
                out.push(' ');
                self.write_sexpr(*args, out);
                out.push(')');
            }
            Expr::Subscript { base, index } => {
                out.push_str("(index ");
                self.write_sexpr(*base, out);
                out.push(' ');
                self.write_sexpr(*index, out);
                out.push(')');
            }
            Expr::Cast { ty, operand } => {
                let _ = write!(out, "(cast {ty} ");
                self.write_sexpr(*operand, out);
                out.push(')');
            }
        }
    }
}
