//! Structural signature of one candidate source line.

use super::DeclaredType;
use rustc_hash::FxHashMap;
use std::fmt;

/// Control-construct category of a line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum LineCategory {
    Empty,
    Line,
    OpenCurlyOnly,
    CloseCurlyOnly,
    /// Label or access specifier ending in `:`
    Marker,
    If,
    ElseIf,
    Else,
    While,
    For,
    Do,
    DoWhile,
    Function,
    Prototype,
}

impl LineCategory {
    pub const ALL: [LineCategory; 14] = [
        LineCategory::Empty,
        LineCategory::Line,
        LineCategory::OpenCurlyOnly,
        LineCategory::CloseCurlyOnly,
        LineCategory::Marker,
        LineCategory::If,
        LineCategory::ElseIf,
        LineCategory::Else,
        LineCategory::While,
        LineCategory::For,
        LineCategory::Do,
        LineCategory::DoWhile,
        LineCategory::Function,
        LineCategory::Prototype,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            LineCategory::Empty => "empty",
            LineCategory::Line => "line",
            LineCategory::OpenCurlyOnly => "open_curly_only",
            LineCategory::CloseCurlyOnly => "close_curly_only",
            LineCategory::Marker => "marker",
            LineCategory::If => "if",
            LineCategory::ElseIf => "else if",
            LineCategory::Else => "else",
            LineCategory::While => "while",
            LineCategory::For => "for",
            LineCategory::Do => "do",
            LineCategory::DoWhile => "dowhile",
            LineCategory::Function => "function",
            LineCategory::Prototype => "prototype",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        LineCategory::ALL.into_iter().find(|c| c.name() == name)
    }

    /// `if` or `else if`: the only frames an `else` may attach to.
    pub const fn is_if_like(self) -> bool {
        matches!(self, LineCategory::If | LineCategory::ElseIf)
    }

    pub const fn is_else_like(self) -> bool {
        matches!(self, LineCategory::Else | LineCategory::ElseIf)
    }

    pub const fn is_curly_only(self) -> bool {
        matches!(
            self,
            LineCategory::OpenCurlyOnly | LineCategory::CloseCurlyOnly
        )
    }
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A name introduced by a line, with the scope offset it lands in.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DeclaredName {
    pub ty: DeclaredType,
    /// 0 for the line's own scope, 1 for the scope the line opens.
    pub depth: u32,
}

/// Everything the search needs to know about one line of code.
///
/// Built once per candidate text and never mutated afterwards.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LineSignature {
    pub category: LineCategory,
    /// A frame is pushed for this line when it is also incomplete.
    pub opens_scope: bool,
    pub starts_with_close: bool,
    pub ends_with_open: bool,
    /// The normalised text ends with `;` or `}`.
    pub complete: bool,
    pub declared: FxHashMap<String, DeclaredName>,
    pub used: FxHashMap<String, u32>,
    pub prototype: Option<String>,
}

impl LineSignature {
    /// Signature with no names for the given category.
    pub fn bare(category: LineCategory) -> Self {
        LineSignature {
            category,
            opens_scope: false,
            starts_with_close: false,
            ends_with_open: false,
            complete: false,
            declared: FxHashMap::default(),
            used: FxHashMap::default(),
            prototype: None,
        }
    }
}
