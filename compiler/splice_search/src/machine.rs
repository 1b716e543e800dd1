//! Scope-tracking state machine.
//!
//! One [`Machine`] per search candidate. Each accepted line moves it
//! through the scope stack and, with semantics checks on, the symbol table.
//! A rejected line leaves the machine in an unspecified state; callers step
//! a clone and drop it on rejection.

use crate::{FrozenConfig, SearchError, SymbolTable};
use im::Vector;
use splice_ir::{LineCategory, Tables};

/// One open control construct awaiting closure.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ScopeFrame {
    pub kind: LineCategory,
    pub has_open_brace: bool,
    /// The controlled statement has ended; only a brace may still be owed.
    pub potentially_complete: bool,
}

/// Why a line cannot extend a candidate.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Rejection {
    /// `}` with no braced frame on the stack.
    NoOpenBrace,
    /// `}` would close a frame whose statement has not ended.
    ClosesIncomplete,
    /// `else` after a `}` that closed something other than an `if`.
    ElseWithoutIf,
    /// `} while` after a `}` that closed something other than a `do`.
    WhileWithoutDo,
    /// `else` without a matching `if` frame in reach.
    NoIfToMatch,
    IndentMismatch { expected: u32, found: u32 },
    Redeclared(String),
    Undeclared(String),
}

impl Rejection {
    pub fn description(&self) -> &'static str {
        match self {
            Rejection::NoOpenBrace => "closing brace without an open brace",
            Rejection::ClosesIncomplete => "closing brace over an incomplete scope",
            Rejection::ElseWithoutIf => "else does not follow an if block",
            Rejection::WhileWithoutDo => "while does not follow a do block",
            Rejection::NoIfToMatch => "no if for else to attach to",
            Rejection::IndentMismatch { .. } => "indentation differs from gold",
            Rejection::Redeclared(_) => "name already declared in this scope",
            Rejection::Undeclared(_) => "name used before declaration",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Machine {
    frames: Vector<ScopeFrame>,
    /// Kind of the frame the last `}` closed, kept across `else` lines.
    closed: Option<LineCategory>,
    table: Option<SymbolTable>,
    track_scope: bool,
}

impl Machine {
    pub fn new(track_scope: bool, track_table: bool) -> Result<Self, SearchError> {
        if track_table && !track_scope {
            return Err(SearchError::TableWithoutScope);
        }
        Ok(Machine {
            frames: Vector::new(),
            closed: None,
            table: track_table.then(SymbolTable::new),
            track_scope,
        })
    }

    pub fn frames(&self) -> &Vector<ScopeFrame> {
        &self.frames
    }

    pub fn table(&self) -> Option<&SymbolTable> {
        self.table.as_ref()
    }

    /// No scope is left open.
    pub fn is_balanced(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the innermost frame holding a `{`.
    fn brace_top(&self) -> Option<usize> {
        (0..self.frames.len())
            .rev()
            .find(|&i| self.frames[i].has_open_brace)
    }

    /// Mark every frame above the innermost brace as potentially complete.
    fn settle_above_brace(&mut self) {
        let start = self.brace_top().map_or(0, |i| i + 1);
        for idx in start..self.frames.len() {
            if let Some(frame) = self.frames.get_mut(idx) {
                frame.potentially_complete = true;
            }
        }
    }

    /// Feed one line. Returns the indentation the line sits at, or `None`
    /// for lines outside the scope structure (empty lines, labels, or when
    /// scopes are not tracked).
    pub fn step(&mut self, line: &FrozenConfig, tables: &Tables) -> Result<Option<u32>, Rejection> {
        let category = line.category();
        if matches!(category, LineCategory::Empty | LineCategory::Marker) || !self.track_scope {
            return Ok(None);
        }

        let mut open_new = !line.complete() && line.opens_scope();
        let mut indent = None;
        let mut level = self.frames.len();

        if line.starts_with_close() {
            let top = self.brace_top().ok_or(Rejection::NoOpenBrace)?;
            indent = Some(top);
            if self.frames.iter().skip(top + 1).any(|f| !f.potentially_complete) {
                return Err(Rejection::ClosesIncomplete);
            }
            let closing = self.frames[top].kind;
            if category.is_else_like() && !closing.is_if_like() {
                return Err(Rejection::ElseWithoutIf);
            }
            if category == LineCategory::While && closing != LineCategory::Do {
                return Err(Rejection::WhileWithoutDo);
            }
            level = top;
            self.closed = Some(closing);
            self.frames.truncate(top);
            self.settle_above_brace();
        } else if !category.is_else_like() {
            self.closed = None;
        }

        let unsettled = (0..self.frames.len())
            .rev()
            .find(|&i| !self.frames[i].potentially_complete)
            .map_or(0, |i| i + 1);

        if category.is_else_like() {
            let target = if self.closed.is_some_and(LineCategory::is_if_like) {
                level
            } else {
                self.matching_if(level, unsettled)?
            };
            level = target;
            self.frames.truncate(target);
        } else if !category.is_curly_only() {
            self.frames.truncate(unsettled);
            level = unsettled;
        }

        if category == LineCategory::OpenCurlyOnly {
            if let Some(last) = self.frames.back_mut().filter(|f| !f.has_open_brace) {
                last.has_open_brace = true;
                indent = Some(level.saturating_sub(1));
                open_new = false;
            }
        }

        let indent = u32::try_from(indent.unwrap_or(level)).unwrap_or(u32::MAX);
        if let Some(expected) = line.indent() {
            if expected != indent {
                return Err(Rejection::IndentMismatch {
                    expected,
                    found: indent,
                });
            }
        }

        if let Some(table) = &mut self.table {
            table.check_line(indent, line.declared(), line.used(), line.prototype(), tables)?;
        }

        if open_new {
            self.frames.push_back(ScopeFrame {
                kind: category,
                has_open_brace: line.ends_with_open(),
                potentially_complete: false,
            });
        } else if line.complete() {
            self.settle_above_brace();
        }
        Ok(Some(indent))
    }

    /// Walk down from just below `level` over potentially complete frames
    /// to the nearest `if`/`else if`, never past `floor`.
    fn matching_if(&self, level: usize, floor: usize) -> Result<usize, Rejection> {
        let mut idx = level.checked_sub(1).ok_or(Rejection::NoIfToMatch)?;
        loop {
            if idx < floor {
                return Err(Rejection::NoIfToMatch);
            }
            let frame = self.frames.get(idx).ok_or(Rejection::NoIfToMatch)?;
            if frame.kind.is_if_like() {
                return Ok(idx);
            }
            if !frame.potentially_complete {
                return Err(Rejection::ClosesIncomplete);
            }
            idx = idx.checked_sub(1).ok_or(Rejection::NoIfToMatch)?;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
