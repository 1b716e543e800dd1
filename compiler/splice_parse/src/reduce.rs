//! Operator-precedence reducer.
//!
//! Works on a flat list of operator tokens and already-built nodes. Each of
//! the 17 levels sweeps the list once, left to right except for the unary
//! level and the assignment level, folding every position where one of its
//! rules applies. Positions where nothing applies are left alone.

use splice_ir::{BinaryOp, Bracket, Expr, ExprArena, ExprId, UnaryOp};
use std::iter;

/// One entry of the reducer's working list.
#[derive(Clone, Debug)]
pub(crate) enum Item {
    Op(String),
    Node(ExprId),
}

impl Item {
    fn node(&self) -> Option<ExprId> {
        match self {
            Item::Node(id) => Some(*id),
            Item::Op(_) => None,
        }
    }

    fn is_op(&self, symbol: &str) -> bool {
        matches!(self, Item::Op(s) if s == symbol)
    }
}

#[derive(Copy, Clone, Debug)]
enum Rule {
    Binary(&'static str),
    /// `x++`
    Postfix(&'static str),
    /// Always unary in prefix position.
    Prefix(&'static str),
    /// Unary only at the start or right after another operator.
    Heuristic(&'static str),
    Call,
    Subscript,
    Cast,
    Ternary,
}

use Rule::{Binary, Call, Cast, Heuristic, Postfix, Prefix, Subscript, Ternary};

const LEVELS: [&[Rule]; 17] = [
    &[Binary("::")],
    &[
        Binary("."),
        Binary("->"),
        Postfix("++"),
        Postfix("--"),
        Call,
        Subscript,
    ],
    &[
        Prefix("++"),
        Prefix("--"),
        Prefix("!"),
        Prefix("~"),
        Prefix("sizeof"),
        Prefix("new"),
        Prefix("delete"),
        Heuristic("+"),
        Heuristic("-"),
        Heuristic("*"),
        Heuristic("&"),
        Cast,
    ],
    &[Binary(".*"), Binary("->*")],
    &[Binary("*"), Binary("/"), Binary("%")],
    &[Binary("+"), Binary("-")],
    &[Binary("<<"), Binary(">>")],
    &[Binary("<=>")],
    &[Binary("<"), Binary("<="), Binary(">"), Binary(">=")],
    &[Binary("=="), Binary("!=")],
    &[Binary("&")],
    &[Binary("^")],
    &[Binary("|")],
    &[Binary("&&")],
    &[Binary("||")],
    &[
        Binary("="),
        Binary("+="),
        Binary("-="),
        Binary("*="),
        Binary("/="),
        Binary("%="),
        Binary("<<="),
        Binary(">>="),
        Binary("&="),
        Binary("^="),
        Binary("|="),
        Ternary,
    ],
    &[Binary(",")],
];

const fn sweeps_right_to_left(level: usize) -> bool {
    level == 2 || level == 15
}

/// Fold `items` level by level, in place.
pub(crate) fn reduce(items: &mut Vec<Item>, arena: &mut ExprArena) {
    for (level, rules) in LEVELS.iter().enumerate() {
        let forward = !sweeps_right_to_left(level);
        let mut cur = if forward {
            Some(0)
        } else {
            items.len().checked_sub(1)
        };
        while let Some(idx) = cur {
            if idx >= items.len() {
                break;
            }
            let at = rules
                .iter()
                .find_map(|rule| apply(*rule, items, idx, arena))
                .unwrap_or(idx);
            cur = if forward { Some(at + 1) } else { at.checked_sub(1) };
        }
    }
}

/// Try one rule at `idx`. On success the folded node replaces its operands
/// and its index is returned.
fn apply(rule: Rule, items: &mut Vec<Item>, idx: usize, arena: &mut ExprArena) -> Option<usize> {
    match rule {
        Binary(symbol) => {
            if idx == 0 || idx + 1 >= items.len() || !items[idx].is_op(symbol) {
                return None;
            }
            let left = items[idx - 1].node()?;
            let right = items[idx + 1].node()?;
            let op = BinaryOp::from_symbol(symbol)?;
            let id = arena.alloc(Expr::Binary { op, left, right });
            Some(replace(items, idx - 1, 3, id))
        }
        Prefix(symbol) | Heuristic(symbol) => {
            if idx + 1 >= items.len() || !items[idx].is_op(symbol) {
                return None;
            }
            let operand = items[idx + 1].node()?;
            let op = if let Heuristic(_) = rule {
                if idx >= 1 && items[idx - 1].node().is_some() {
                    return None;
                }
                UnaryOp::ambiguous_from_symbol(symbol)?
            } else {
                UnaryOp::prefix_from_symbol(symbol)?
            };
            let id = arena.alloc(Expr::Unary {
                op,
                operand,
                postfix: false,
            });
            Some(replace(items, idx, 2, id))
        }
        Postfix(symbol) => {
            if idx == 0 || !items[idx].is_op(symbol) {
                return None;
            }
            let operand = items[idx - 1].node()?;
            let op = UnaryOp::prefix_from_symbol(symbol)?;
            let id = arena.alloc(Expr::Unary {
                op,
                operand,
                postfix: true,
            });
            Some(replace(items, idx - 1, 2, id))
        }
        Call | Subscript => {
            let bracket = if let Call = rule {
                Bracket::Paren
            } else {
                Bracket::Square
            };
            if idx == 0 {
                return None;
            }
            let group = items[idx].node()?;
            let callee = items[idx - 1].node()?;
            if !arena.is_group(group, bracket) || arena.is_type_paren(callee) {
                return None;
            }
            let expr = if let Call = rule {
                Expr::Call {
                    callee,
                    args: group,
                }
            } else {
                Expr::Subscript {
                    base: callee,
                    index: group,
                }
            };
            let id = arena.alloc(expr);
            Some(replace(items, idx - 1, 2, id))
        }
        Cast => {
            if idx == 0 {
                return None;
            }
            let operand = items[idx].node()?;
            let target = items[idx - 1].node()?;
            let Expr::TypeParen(ty) = arena.get(target) else {
                return None;
            };
            let ty = ty.clone();
            let id = arena.alloc(Expr::Cast { ty, operand });
            Some(replace(items, idx - 1, 2, id))
        }
        Ternary => {
            if idx == 0 || idx + 4 > items.len() {
                return None;
            }
            if !items[idx].is_op("?") || !items[idx + 2].is_op(":") {
                return None;
            }
            let cond = items[idx - 1].node()?;
            let then_branch = items[idx + 1].node()?;
            let else_branch = items[idx + 3].node()?;
            let id = arena.alloc(Expr::Ternary {
                cond,
                then_branch,
                else_branch,
            });
            Some(replace(items, idx - 1, 5, id))
        }
    }
}

fn replace(items: &mut Vec<Item>, start: usize, len: usize, id: ExprId) -> usize {
    items.splice(start..start + len, iter::once(Item::Node(id)));
    start
}
