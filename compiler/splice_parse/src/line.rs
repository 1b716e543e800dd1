//! Line classifier.
//!
//! Recognises the control construct a line belongs to by keyword presence
//! and runs that construct's grammar, a short list of atoms each matched in
//! turn. What the grammar captures becomes the line's statement fragments.

use crate::ParseError;
use splice_ir::{LineCategory, Token, TokenKind};
use splice_lexer::{filter_space, join_tokens, normalize_line, tokenize};

/// Fragments with this text carry no statement.
const TRIVIAL: [&str; 4] = ["", ";", "}", "{"];

/// A statement fragment recovered from a line.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Fragment {
    pub text: String,
    /// 1 when the fragment lives in the scope the line opens.
    pub depth: u32,
}

impl Fragment {
    fn new(text: impl Into<String>, depth: u32) -> Self {
        Fragment {
            text: text.into(),
            depth,
        }
    }
}

/// Structural shape of a line before any fragment is parsed.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LineShape {
    pub category: LineCategory,
    pub starts_with_close: bool,
    pub ends_with_open: bool,
    pub opens_scope: bool,
    pub fragments: Vec<Fragment>,
}

/// The normalised text ends a statement.
pub(crate) fn is_complete(normalized: &str) -> bool {
    normalized.ends_with(';') || normalized.ends_with('}')
}

#[derive(Copy, Clone, Debug)]
enum Matcher {
    CloseCurly,
    Keyword(&'static str),
    /// Parenthesised group starting at the cursor.
    Paren,
    /// Rest of the line, unwrapped from `{ ... }` when it spans to the end.
    Trailing,
}

#[derive(Copy, Clone, Debug)]
struct Atom {
    name: &'static str,
    matcher: Matcher,
    required: bool,
}

const fn atom(name: &'static str, matcher: Matcher, required: bool) -> Atom {
    Atom {
        name,
        matcher,
        required,
    }
}

const IF_GRAMMAR: &[Atom] = &[
    atom("}", Matcher::CloseCurly, false),
    atom("else", Matcher::Keyword("else"), false),
    atom("if", Matcher::Keyword("if"), true),
    atom("predicate", Matcher::Paren, false),
    atom("statement", Matcher::Trailing, false),
];

const ELSE_GRAMMAR: &[Atom] = &[
    atom("}", Matcher::CloseCurly, false),
    atom("else", Matcher::Keyword("else"), true),
    atom("statement", Matcher::Trailing, false),
];

const WHILE_GRAMMAR: &[Atom] = &[
    atom("}", Matcher::CloseCurly, false),
    atom("while", Matcher::Keyword("while"), true),
    atom("condition", Matcher::Paren, false),
    atom("statement", Matcher::Trailing, false),
];

const FOR_GRAMMAR: &[Atom] = &[
    atom("for", Matcher::Keyword("for"), true),
    atom("control", Matcher::Paren, false),
    atom("statement", Matcher::Trailing, false),
];

const DO_GRAMMAR: &[Atom] = &[
    atom("do", Matcher::Keyword("do"), true),
    atom("statement", Matcher::Trailing, false),
];

const LINE_GRAMMAR: &[Atom] = &[atom("statement", Matcher::Trailing, true)];

/// What a grammar captured.
#[derive(Default)]
struct Captures {
    paren: Option<Vec<Token>>,
    /// `None` when the line has no trailing statement or ends in an
    /// unclosed `{`.
    body: Option<String>,
}

enum Capture {
    Nothing,
    Paren(Vec<Token>),
    Body(Option<String>),
}

impl Matcher {
    /// Next cursor and capture, or `None` if the atom does not match.
    fn apply(self, tokens: &[Token], cur: usize) -> Option<(usize, Capture)> {
        let token = &tokens[cur];
        match self {
            Matcher::CloseCurly => {
                (token.kind == TokenKind::CloseCurly).then_some((cur + 1, Capture::Nothing))
            }
            Matcher::Keyword(word) => {
                (!token.kind.is_quoted() && token.text == word).then_some((cur + 1, Capture::Nothing))
            }
            Matcher::Paren => {
                if token.kind != TokenKind::OpenParen {
                    return None;
                }
                let close = matching_close(tokens, cur)?;
                Some((close + 1, Capture::Paren(tokens[cur + 1..close].to_vec())))
            }
            Matcher::Trailing => Some((tokens.len(), Capture::Body(trailing(tokens, cur)))),
        }
    }
}

fn trailing(tokens: &[Token], cur: usize) -> Option<String> {
    let mut rest = &tokens[cur..];
    if rest[0].kind == TokenKind::OpenCurly {
        let close = matching_close(tokens, cur)?;
        if close + 1 != tokens.len() {
            return None;
        }
        rest = &tokens[cur + 1..close];
    }
    if let [init @ .., last] = rest {
        if last.kind == TokenKind::Semicolon {
            rest = init;
        }
    }
    Some(join_tokens(rest))
}

/// Index of the bracket closing the opener at `open`.
fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let opener = tokens[open].kind;
    let closer = opener.closer()?;
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if token.kind == opener {
            depth += 1;
        } else if token.kind == closer {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

fn run_grammar(tokens: &[Token], grammar: &[Atom]) -> Result<Captures, ParseError> {
    let tokens = match tokens {
        [init @ .., last] if last.kind == TokenKind::Semicolon => init,
        _ => tokens,
    };
    let mut captures = Captures::default();
    let mut cur = 0;
    for atom in grammar {
        let step = if cur < tokens.len() {
            atom.matcher.apply(tokens, cur)
        } else {
            None
        };
        match step {
            Some((next, capture)) => {
                cur = next;
                match capture {
                    Capture::Nothing => {}
                    Capture::Paren(inner) => captures.paren = Some(inner),
                    Capture::Body(body) => captures.body = body,
                }
            }
            None if atom.required => return Err(ParseError::MissingAtom(atom.name)),
            None => {}
        }
    }
    Ok(captures)
}

/// Split on separators outside any bracket.
fn split_top_level(tokens: &[Token], is_separator: impl Fn(&Token) -> bool) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if token.kind.is_opener() {
            depth += 1;
        } else if token.kind.is_closer() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && is_separator(token) {
            parts.push(&tokens[start..i]);
            start = i + 1;
        }
    }
    parts.push(&tokens[start..]);
    parts
}

/// Statements separated by top-level `;`.
pub(crate) fn split_statements(tokens: &[Token]) -> Vec<&[Token]> {
    split_top_level(tokens, |t| t.kind == TokenKind::Semicolon)
}

/// `init; cond; step` or `decl : range`.
fn for_control(control: &[Token]) -> Result<Vec<String>, ParseError> {
    let parts = split_statements(control);
    if parts.len() == 3 {
        return Ok(parts.into_iter().map(join_tokens).collect());
    }
    let parts = split_top_level(control, |t| t.is_op(":"));
    if parts.len() == 2 {
        return Ok(parts.into_iter().map(join_tokens).collect());
    }
    Err(ParseError::BadForControl)
}

/// A single leading `}` and a single trailing `{` are tolerated; everything
/// between must balance on its own.
fn braces_well_formed(tokens: &[Token]) -> bool {
    let mut inner = tokens;
    if let [first, rest @ ..] = inner {
        if first.kind == TokenKind::CloseCurly {
            inner = rest;
        }
    }
    if let [rest @ .., last] = inner {
        if last.kind == TokenKind::OpenCurly {
            inner = rest;
        }
    }
    let mut count = 0i32;
    for token in inner {
        match token.kind {
            TokenKind::OpenCurly => count += 1,
            TokenKind::CloseCurly => count -= 1,
            _ => {}
        }
        if count < 0 {
            return false;
        }
    }
    count == 0
}

/// Classify one line and recover its statement fragments.
pub fn classify_line(line: &str) -> Result<LineShape, ParseError> {
    let normalized = normalize_line(line);
    let tokens = filter_space(&tokenize(&normalized));
    let starts_with_close = tokens.first().is_some_and(|t| t.kind == TokenKind::CloseCurly);
    let ends_with_open = tokens.last().is_some_and(|t| t.kind == TokenKind::OpenCurly);
    let shape = |category, opens_scope, fragments| LineShape {
        category,
        starts_with_close,
        ends_with_open,
        opens_scope,
        fragments,
    };

    if normalized.ends_with(':') {
        return Ok(shape(LineCategory::Marker, ends_with_open, Vec::new()));
    }
    if !braces_well_formed(&tokens) {
        return Err(ParseError::UnbalancedBraces);
    }
    let trivial = match normalized.as_str() {
        "" => Some(LineCategory::Empty),
        ";" => Some(LineCategory::Line),
        "}" => Some(LineCategory::CloseCurlyOnly),
        "{" => Some(LineCategory::OpenCurlyOnly),
        _ => None,
    };
    if let Some(category) = trivial {
        return Ok(shape(category, ends_with_open, Vec::new()));
    }

    let has = |word: &str| tokens.iter().any(|t| !t.kind.is_quoted() && t.text == word);
    let (has_do, has_while) = (has("do"), has("while"));
    let mut fragments = Vec::new();

    let (category, opens_scope) = if has("if") {
        let found = run_grammar(&tokens, IF_GRAMMAR)?;
        let category = if has("else") {
            LineCategory::ElseIf
        } else {
            LineCategory::If
        };
        fragments.extend(found.paren.map(|p| Fragment::new(join_tokens(&p), 0)));
        let opens = found.body.is_none();
        fragments.extend(found.body.map(|b| Fragment::new(b, 1)));
        (category, opens)
    } else if has("else") {
        let found = run_grammar(&tokens, ELSE_GRAMMAR)?;
        let opens = found.body.is_none();
        fragments.extend(found.body.map(|b| Fragment::new(b, 1)));
        (LineCategory::Else, opens)
    } else if has_while && !has_do {
        let found = run_grammar(&tokens, WHILE_GRAMMAR)?;
        fragments.extend(found.paren.map(|p| Fragment::new(join_tokens(&p), 0)));
        // `} while (..);` closes a do-block instead of opening a loop.
        let opens = found.body.is_none() && !starts_with_close;
        fragments.extend(found.body.map(|b| Fragment::new(b, 1)));
        (LineCategory::While, opens)
    } else if has("for") {
        let found = run_grammar(&tokens, FOR_GRAMMAR)?;
        let control = found.paren.ok_or(ParseError::BadForControl)?;
        fragments.extend(for_control(&control)?.into_iter().map(|p| Fragment::new(p, 1)));
        let opens = found.body.is_none();
        fragments.extend(found.body.map(|b| Fragment::new(b, 1)));
        (LineCategory::For, opens)
    } else if has_do && !has_while {
        let found = run_grammar(&tokens, DO_GRAMMAR)?;
        let opens = found.body.is_none();
        fragments.extend(found.body.map(|b| Fragment::new(b, 1)));
        (LineCategory::Do, opens)
    } else if has_do {
        let split = tokens
            .iter()
            .position(|t| !t.kind.is_quoted() && t.text == "while")
            .unwrap_or(tokens.len());
        let body = run_grammar(&tokens[..split], DO_GRAMMAR)?;
        let cond = run_grammar(&tokens[split..], WHILE_GRAMMAR)?;
        fragments.extend(body.body.map(|b| Fragment::new(b, 1)));
        fragments.extend(cond.paren.map(|p| Fragment::new(join_tokens(&p), 0)));
        fragments.extend(cond.body.map(|b| Fragment::new(b, 1)));
        (LineCategory::DoWhile, false)
    } else {
        let found = run_grammar(&tokens, LINE_GRAMMAR)?;
        fragments.extend(found.body.map(|b| Fragment::new(b, 0)));
        (LineCategory::Line, !is_complete(&normalized))
    };

    fragments.retain(|f| !TRIVIAL.contains(&f.text.as_str()));
    tracing::trace!(%category, fragments = fragments.len(), "classified line");
    Ok(shape(category, opens_scope, fragments))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
