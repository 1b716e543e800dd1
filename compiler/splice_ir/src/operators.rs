//! Operator vocabulary for the expression forest.

use std::fmt;

/// Binary operators, including member access and the comma operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Scope,
    Member,
    Arrow,
    MemberPtr,
    ArrowPtr,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Shl,
    Shr,
    Spaceship,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    XorAssign,
    OrAssign,
    Comma,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "::" => BinaryOp::Scope,
            "." => BinaryOp::Member,
            "->" => BinaryOp::Arrow,
            ".*" => BinaryOp::MemberPtr,
            "->*" => BinaryOp::ArrowPtr,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Mod,
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "<<" => BinaryOp::Shl,
            ">>" => BinaryOp::Shr,
            "<=>" => BinaryOp::Spaceship,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::LtEq,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::GtEq,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::NotEq,
            "&" => BinaryOp::BitAnd,
            "^" => BinaryOp::BitXor,
            "|" => BinaryOp::BitOr,
            "&&" => BinaryOp::And,
            "||" => BinaryOp::Or,
            "=" => BinaryOp::Assign,
            "+=" => BinaryOp::AddAssign,
            "-=" => BinaryOp::SubAssign,
            "*=" => BinaryOp::MulAssign,
            "/=" => BinaryOp::DivAssign,
            "%=" => BinaryOp::ModAssign,
            "<<=" => BinaryOp::ShlAssign,
            ">>=" => BinaryOp::ShrAssign,
            "&=" => BinaryOp::AndAssign,
            "^=" => BinaryOp::XorAssign,
            "|=" => BinaryOp::OrAssign,
            "," => BinaryOp::Comma,
            _ => return None,
        };
        Some(op)
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Scope => "::",
            BinaryOp::Member => ".",
            BinaryOp::Arrow => "->",
            BinaryOp::MemberPtr => ".*",
            BinaryOp::ArrowPtr => "->*",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Spaceship => "<=>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Assign => "=",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubAssign => "-=",
            BinaryOp::MulAssign => "*=",
            BinaryOp::DivAssign => "/=",
            BinaryOp::ModAssign => "%=",
            BinaryOp::ShlAssign => "<<=",
            BinaryOp::ShrAssign => ">>=",
            BinaryOp::AndAssign => "&=",
            BinaryOp::XorAssign => "^=",
            BinaryOp::OrAssign => "|=",
            BinaryOp::Comma => ",",
        }
    }

    /// The right operand names a member, not a variable in scope.
    pub const fn selects_member(self) -> bool {
        matches!(self, BinaryOp::Scope | BinaryOp::Member | BinaryOp::Arrow)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Unary operators, prefix and postfix.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Inc,
    Dec,
    Not,
    BitNot,
    Sizeof,
    New,
    Delete,
    Plus,
    Neg,
    Deref,
    AddrOf,
}

impl UnaryOp {
    /// Operators that are always unary when they appear in prefix position.
    pub fn prefix_from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "++" => UnaryOp::Inc,
            "--" => UnaryOp::Dec,
            "!" => UnaryOp::Not,
            "~" => UnaryOp::BitNot,
            "sizeof" => UnaryOp::Sizeof,
            "new" => UnaryOp::New,
            "delete" => UnaryOp::Delete,
            _ => return None,
        };
        Some(op)
    }

    /// Operators that are unary only when nothing operand-like precedes them.
    pub fn ambiguous_from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => UnaryOp::Plus,
            "-" => UnaryOp::Neg,
            "*" => UnaryOp::Deref,
            "&" => UnaryOp::AddrOf,
            _ => return None,
        };
        Some(op)
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Inc => "++",
            UnaryOp::Dec => "--",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Sizeof => "sizeof",
            UnaryOp::New => "new",
            UnaryOp::Delete => "delete",
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Deref => "*",
            UnaryOp::AddrOf => "&",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
