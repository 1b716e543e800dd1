#![allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use splice_ir::{LineCategory, Tables};
use splice_parse::build_signature;
use splice_search::{
    pseudo_compile_check, search_groups, MultiQueue, SearchConfig, SearchOption, SearchOutcome,
};

fn candidates(lines: &[&[(&str, f64)]]) -> Vec<Vec<(String, f64)>> {
    lines
        .iter()
        .map(|line| line.iter().map(|(t, c)| ((*t).to_string(), *c)).collect())
        .collect()
}

fn search(lines: &[&[(&str, f64)]], option: SearchOption) -> SearchOutcome {
    search_groups(
        &candidates(lines),
        None,
        &SearchConfig::with_option(option),
        Tables::standard(),
    )
    .unwrap()
}

#[test]
fn if_line_signature() {
    let signature = build_signature("if (x > 0) {", Tables::standard()).unwrap();
    assert_eq!(signature.category, LineCategory::If);
    assert!(signature.opens_scope);
    assert!(signature.declared.is_empty());
    assert_eq!(signature.used.get("x"), Some(&0));
    assert_eq!(signature.used.len(), 1);
}

#[test]
fn guarded_return_closes_its_scope() {
    let program = "int x;\nif (x > 0) {\nreturn x;\n}";
    for option in [SearchOption::Syntax, SearchOption::Semantics] {
        assert!(pseudo_compile_check(program, None, option, Tables::standard()).unwrap());
    }

    let outcome = search(
        &[
            &[("int x;", 0.0)],
            &[("if (x > 0) {", 0.0)],
            &[("return x;", 0.0)],
            &[("}", 0.0)],
        ],
        SearchOption::Semantics,
    );
    assert_eq!(
        outcome.indent_histories,
        vec![vec![Some(0), Some(0), Some(1), Some(0)]]
    );
}

#[test]
fn undeclared_predicate_fails_only_with_semantics() {
    let program = "if (x > 0) {\nreturn x;\n}";
    let tables = Tables::standard();
    assert!(pseudo_compile_check(program, None, SearchOption::Syntax, tables).unwrap());
    assert!(!pseudo_compile_check(program, None, SearchOption::Semantics, tables).unwrap());
}

#[test]
fn redeclaration_in_one_scope_is_rejected() {
    let program = "int main() {\nint x;\nint x;\n}";
    let tables = Tables::standard();
    assert!(!pseudo_compile_check(program, None, SearchOption::Semantics, tables).unwrap());
    assert!(pseudo_compile_check(program, None, SearchOption::Syntax, tables).unwrap());
}

#[test]
fn outer_name_is_visible_in_inner_scope() {
    let program = [
        "int main() {",
        "int x = 0;",
        "while (x < 3) {",
        "x = x + 1;",
        "}",
        "return x;",
        "}",
    ]
    .join("\n");
    assert!(
        pseudo_compile_check(&program, None, SearchOption::Semantics, Tables::standard()).unwrap()
    );
}

#[test]
fn semantics_prunes_redeclaring_candidates() {
    let lines: &[&[(&str, f64)]] = &[&[("int x;", 0.0)], &[("int x;", 0.1), ("x = 1;", 0.2)]];

    let syntax = search(lines, SearchOption::Syntax).groups.unwrap();
    let codes: Vec<String> = MultiQueue::new(&syntax).map(|a| a.code).collect();
    assert_eq!(codes, vec!["int x;\nint x;", "int x;\nx = 1;"]);

    let semantics = search(lines, SearchOption::Semantics).groups.unwrap();
    let codes: Vec<String> = MultiQueue::new(&semantics).map(|a| a.code).collect();
    assert_eq!(codes, vec!["int x;\nx = 1;"]);
}

#[test]
fn unbalanced_candidates_yield_no_groups() {
    let outcome = search(&[&[("int main() {", 0.0)], &[("return 0;", 0.0)]], SearchOption::Syntax);
    assert!(outcome.groups.is_none());
}
