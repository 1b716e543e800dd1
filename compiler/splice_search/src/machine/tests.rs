use super::*;
use crate::ConfigKind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use splice_parse::build_signature;

fn config(line: &str, kind: ConfigKind) -> FrozenConfig {
    let signature = build_signature(line, Tables::standard()).unwrap();
    FrozenConfig::of(&signature, kind, None)
}

/// Feed `lines` in order; the indents of accepted lines, or the first
/// rejection.
fn run(machine: &mut Machine, kind: ConfigKind, lines: &[&str]) -> Result<Vec<Option<u32>>, Rejection> {
    lines
        .iter()
        .map(|line| machine.step(&config(line, kind), Tables::standard()))
        .collect()
}

fn syntax(lines: &[&str]) -> Result<Vec<Option<u32>>, Rejection> {
    let mut machine = Machine::new(true, false).unwrap();
    let indents = run(&mut machine, ConfigKind::Syntax, lines)?;
    assert!(machine.is_balanced(), "scope left open after {lines:?}");
    Ok(indents)
}

fn semantics(lines: &[&str]) -> Result<Vec<Option<u32>>, Rejection> {
    let mut machine = Machine::new(true, true).unwrap();
    run(&mut machine, ConfigKind::Table, lines)
}

#[test]
fn if_block_with_declared_name() {
    let indents = semantics(&["int x;", "if (x > 0) {", "return x;", "}"]).unwrap();
    assert_eq!(indents, vec![Some(0), Some(0), Some(1), Some(0)]);
}

#[test]
fn predicate_name_must_be_declared() {
    assert_eq!(
        semantics(&["if (x > 0) {"]),
        Err(Rejection::Undeclared("x".to_string()))
    );
}

#[test]
fn same_scope_redeclaration_is_rejected() {
    assert_eq!(
        semantics(&["int x;", "int x;"]),
        Err(Rejection::Redeclared("x".to_string()))
    );
}

#[test]
fn outer_declaration_is_visible_in_inner_scope() {
    let indents = semantics(&["int x;", "while (true) {", "x = 1;", "}"]).unwrap();
    assert_eq!(indents, vec![Some(0), Some(0), Some(1), Some(0)]);
}

#[test]
fn loop_variable_is_scoped_to_the_loop() {
    let lines = ["int n = 3;", "for (int i = 0; i < n; i++) {", "n += i;", "}", "n = i;"];
    assert_eq!(semantics(&lines), Err(Rejection::Undeclared("i".to_string())));
    assert!(semantics(&lines[..4]).is_ok());
}

#[test]
fn braceless_if_else_chain() {
    let lines = [
        "int main() {",
        "if (x)",
        "y = 1;",
        "else",
        "y = 2;",
        "return 0;",
        "}",
    ];
    let indents = syntax(&lines).unwrap();
    assert_eq!(
        indents,
        vec![Some(0), Some(1), Some(2), Some(1), Some(2), Some(1), Some(0)]
    );
}

#[test]
fn braced_else_reopens_at_the_same_level() {
    let indents = syntax(&["if (x) {", "y;", "} else {", "z;", "}"]).unwrap();
    assert_eq!(indents, vec![Some(0), Some(1), Some(0), Some(1), Some(0)]);
}

#[test]
fn else_after_closing_brace_line() {
    let indents = syntax(&["if (x) {", "y;", "}", "else {", "z;", "}"]).unwrap();
    assert_eq!(indents, vec![Some(0), Some(1), Some(0), Some(0), Some(1), Some(0)]);
}

#[test]
fn do_while_closes_its_block() {
    let indents = syntax(&["do {", "x++;", "} while (x < 5);"]).unwrap();
    assert_eq!(indents, vec![Some(0), Some(1), Some(0)]);
}

#[test]
fn lone_brace_attaches_to_open_frame() {
    let indents = syntax(&["if (x)", "{", "y;", "}"]).unwrap();
    assert_eq!(indents, vec![Some(0), Some(0), Some(1), Some(0)]);
}

#[test]
fn labels_and_blank_lines_pass_through() {
    let indents = syntax(&["int main() {", "", "done:", "return 0;", "}"]).unwrap();
    assert_eq!(indents, vec![Some(0), None, None, Some(1), Some(0)]);
}

#[test]
fn scope_rejections() {
    assert_eq!(syntax(&["}"]), Err(Rejection::NoOpenBrace));
    assert_eq!(syntax(&["else {"]), Err(Rejection::NoIfToMatch));
    assert_eq!(
        syntax(&["while (x) {", "} else {"]),
        Err(Rejection::ElseWithoutIf)
    );
    assert_eq!(
        syntax(&["if (x) {", "} while (y);"]),
        Err(Rejection::WhileWithoutDo)
    );
    assert_eq!(
        syntax(&["int main() {", "if (x)", "}"]),
        Err(Rejection::ClosesIncomplete)
    );
}

#[test]
fn gold_indentation_is_enforced() {
    let mut machine = Machine::new(true, false).unwrap();
    let line = config("int x;", ConfigKind::Syntax).with_indent(Some(1));
    assert_eq!(
        machine.step(&line, Tables::standard()),
        Err(Rejection::IndentMismatch {
            expected: 1,
            found: 0
        })
    );
}

#[test]
fn table_requires_scope_tracking() {
    assert_eq!(
        Machine::new(false, true).err(),
        Some(SearchError::TableWithoutScope)
    );
}

#[test]
fn rejections_have_descriptions() {
    assert_eq!(Rejection::NoOpenBrace.description(), "closing brace without an open brace");
    assert_eq!(
        Rejection::Undeclared("x".to_string()).description(),
        "name used before declaration"
    );
}

#[derive(Copy, Clone, PartialEq)]
enum Opened {
    If,
    Loop,
    Do,
    Else,
}

type ScriptLine = (&'static str, u32, usize);

fn depth(open: &[Opened]) -> u32 {
    u32::try_from(open.len()).unwrap()
}

fn close_scope(open: &mut Vec<Opened>, lines: &mut Vec<ScriptLine>, chain: bool) {
    let top = open.pop().unwrap();
    let indent = depth(open);
    let line = match top {
        Opened::If if chain => {
            open.push(Opened::Else);
            "} else {"
        }
        Opened::Do => "} while (x < 3);",
        Opened::If | Opened::Loop | Opened::Else => "}",
    };
    lines.push((line, indent, open.len()));
}

/// Turn random choices into a brace-balanced program, each line paired
/// with its expected indent and the brace depth after it.
fn braced_program(choices: &[(u8, bool)]) -> Vec<ScriptLine> {
    let mut open: Vec<Opened> = Vec::new();
    let mut lines = Vec::new();

    for &(choice, chain) in choices {
        let opener = match choice % 6 {
            1 => Some(("if (x > 0) {", Opened::If)),
            2 => Some(("while (x) {", Opened::Loop)),
            3 => Some(("for (int i = 0; i < 3; i++) {", Opened::Loop)),
            4 => Some(("do {", Opened::Do)),
            _ => None,
        };
        if let Some((line, kind)) = opener {
            lines.push((line, depth(&open), open.len() + 1));
            open.push(kind);
        } else if choice % 6 == 5 && !open.is_empty() {
            close_scope(&mut open, &mut lines, chain);
        } else {
            lines.push(("x = x + 1;", depth(&open), open.len()));
        }
    }
    while !open.is_empty() {
        close_scope(&mut open, &mut lines, false);
    }
    lines
}

proptest! {
    #[test]
    fn brace_frames_track_the_indent(
        choices in prop::collection::vec((0u8..6, any::<bool>()), 0..40)
    ) {
        let mut machine = Machine::new(true, false).unwrap();
        for (line, indent, depth) in braced_program(&choices) {
            let found = machine.step(&config(line, ConfigKind::Syntax), Tables::standard());
            prop_assert_eq!(found, Ok(Some(indent)), "line {:?}", line);
            prop_assert_eq!(machine.frames().len(), depth, "after {:?}", line);
            prop_assert!(machine.frames().iter().all(|f| f.has_open_brace));
        }
        prop_assert!(machine.is_balanced());
    }
}
