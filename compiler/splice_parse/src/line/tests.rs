use super::*;
use pretty_assertions::assert_eq;

fn frags(shape: &LineShape) -> Vec<(&str, u32)> {
    shape
        .fragments
        .iter()
        .map(|f| (f.text.as_str(), f.depth))
        .collect()
}

#[test]
fn if_with_open_brace() {
    let shape = classify_line("if (x > 0) {").unwrap();
    assert_eq!(shape.category, LineCategory::If);
    assert!(shape.opens_scope);
    assert!(shape.ends_with_open);
    assert!(!shape.starts_with_close);
    assert_eq!(frags(&shape), vec![("x > 0", 0)]);
}

#[test]
fn else_if_with_inline_statement() {
    let shape = classify_line("} else if (a) return b;").unwrap();
    assert_eq!(shape.category, LineCategory::ElseIf);
    assert!(shape.starts_with_close);
    assert!(!shape.opens_scope);
    assert_eq!(frags(&shape), vec![("a", 0), ("return b", 1)]);
}

#[test]
fn braced_else() {
    let shape = classify_line("} else {").unwrap();
    assert_eq!(shape.category, LineCategory::Else);
    assert!(shape.opens_scope);
    assert!(shape.fragments.is_empty());
}

#[test]
fn inline_braced_body_is_unwrapped() {
    let shape = classify_line("if (a) { b; }").unwrap();
    assert!(!shape.opens_scope);
    assert_eq!(frags(&shape), vec![("a", 0), ("b", 1)]);
}

#[test]
fn for_loop_with_three_clauses() {
    let shape = classify_line("for (int i = 0; i < n; i++) {").unwrap();
    assert_eq!(shape.category, LineCategory::For);
    assert!(shape.opens_scope);
    assert_eq!(
        frags(&shape),
        vec![("int i = 0", 1), ("i < n", 1), ("i ++", 1)]
    );
}

#[test]
fn range_for() {
    let shape = classify_line("for (auto x : v)").unwrap();
    assert_eq!(frags(&shape), vec![("auto x", 1), ("v", 1)]);
    assert!(shape.opens_scope);
}

#[test]
fn empty_for_clauses_are_dropped() {
    let shape = classify_line("for (;;) {").unwrap();
    assert!(shape.fragments.is_empty());
}

#[test]
fn malformed_for_control() {
    assert_eq!(classify_line("for (x)"), Err(ParseError::BadForControl));
    assert_eq!(classify_line("for x"), Err(ParseError::BadForControl));
}

#[test]
fn while_loop_with_body() {
    let shape = classify_line("while (i < n) i++;").unwrap();
    assert_eq!(shape.category, LineCategory::While);
    assert!(!shape.opens_scope);
    assert_eq!(frags(&shape), vec![("i < n", 0), ("i ++", 1)]);
}

#[test]
fn while_closing_a_do_block_opens_nothing() {
    let shape = classify_line("} while (i < n);").unwrap();
    assert_eq!(shape.category, LineCategory::While);
    assert!(shape.starts_with_close);
    assert!(!shape.opens_scope);
    assert_eq!(frags(&shape), vec![("i < n", 0)]);
}

#[test]
fn do_lines() {
    let open = classify_line("do {").unwrap();
    assert_eq!(open.category, LineCategory::Do);
    assert!(open.opens_scope);

    let whole = classify_line("do { x++; } while (x < 5);").unwrap();
    assert_eq!(whole.category, LineCategory::DoWhile);
    assert!(!whole.opens_scope);
    assert_eq!(frags(&whole), vec![("x ++", 1), ("x < 5", 0)]);
}

#[test]
fn plain_statement() {
    let shape = classify_line("int x = 5;").unwrap();
    assert_eq!(shape.category, LineCategory::Line);
    assert!(!shape.opens_scope);
    assert_eq!(frags(&shape), vec![("int x = 5", 0)]);

    let open = classify_line("int y = f(a,").unwrap();
    assert!(open.opens_scope);
}

#[test]
fn keywords_inside_strings_are_ignored() {
    let shape = classify_line(r#"cout << "if" << endl;"#).unwrap();
    assert_eq!(shape.category, LineCategory::Line);
    assert_eq!(frags(&shape), vec![(r#"cout << "if" << endl"#, 0)]);
}

#[test]
fn trivial_lines() {
    let cases = [
        ("", LineCategory::Empty),
        (";", LineCategory::Line),
        ("}", LineCategory::CloseCurlyOnly),
        ("  {  ", LineCategory::OpenCurlyOnly),
    ];
    for (line, category) in cases {
        let shape = classify_line(line).unwrap();
        assert_eq!(shape.category, category, "{line:?}");
        assert!(shape.fragments.is_empty());
    }
    assert!(classify_line("{").unwrap().opens_scope);
    assert!(!classify_line("}").unwrap().opens_scope);
}

#[test]
fn markers() {
    for line in ["public:", "default:", "case 1:"] {
        let shape = classify_line(line).unwrap();
        assert_eq!(shape.category, LineCategory::Marker);
        assert!(!shape.opens_scope);
    }
}

#[test]
fn unbalanced_braces_fail() {
    assert_eq!(classify_line("} }"), Err(ParseError::UnbalancedBraces));
    assert_eq!(classify_line("{ {"), Err(ParseError::UnbalancedBraces));
    assert_eq!(classify_line("x = 1; } {"), Err(ParseError::UnbalancedBraces));
}

#[test]
fn required_keyword_missing() {
    assert_eq!(classify_line("x = else;"), Err(ParseError::MissingAtom("else")));
}

#[test]
fn statements_split_outside_brackets() {
    let tokens = filter_space(&tokenize("a = f(b; c); d; e"));
    let parts: Vec<String> = split_statements(&tokens).into_iter().map(join_tokens).collect();
    assert_eq!(parts, vec!["a = f ( b ; c )", "d", "e"]);
}
