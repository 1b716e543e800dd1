use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use splice_ir::{DeclaredName, DeclaredType, Tables};
use splice_parse::build_signature;

fn config(line: &str, kind: ConfigKind) -> FrozenConfig {
    let signature = build_signature(line, Tables::standard()).unwrap();
    FrozenConfig::of(&signature, kind, None)
}

#[test]
fn whitespace_variants_freeze_equal() {
    assert_eq!(
        config("int a=b,c=d;", ConfigKind::Table),
        config("int a = b , c = d ;", ConfigKind::Table)
    );
}

#[test]
fn syntax_configs_ignore_names() {
    assert_eq!(
        config("int a = 1;", ConfigKind::Syntax),
        config("x = y;", ConfigKind::Syntax)
    );
    assert_ne!(
        config("int a = 1;", ConfigKind::Table),
        config("x = y;", ConfigKind::Table)
    );
}

#[test]
fn table_configs_carry_the_declared_type() {
    assert_ne!(
        config("int x;", ConfigKind::Table),
        config("long long x;", ConfigKind::Table)
    );
    assert_eq!(
        config("int x;", ConfigKind::Syntax),
        config("long long x;", ConfigKind::Syntax)
    );
    let frozen = config("vector<int> v;", ConfigKind::Table);
    let [(name, decl)] = frozen.declared() else {
        panic!("expected one declaration");
    };
    assert_eq!(name, "v");
    assert_eq!(decl.ty.to_string(), "vector<int>");
    assert_eq!(decl.depth, 0);
}

#[test]
fn table_fields_are_sorted() {
    let frozen = config("int b = d + c, a;", ConfigKind::Table);
    let declared: Vec<&str> = frozen.declared().iter().map(|(n, _)| n.as_str()).collect();
    let used: Vec<&str> = frozen.used().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(declared, vec!["a", "b"]);
    assert_eq!(used, vec!["c", "d"]);
}

#[test]
fn indent_is_part_of_the_key() {
    let plain = config("}", ConfigKind::Syntax);
    let indented = plain.with_indent(Some(2));
    assert_ne!(plain, indented);
    assert_eq!(indented.indent(), Some(2));
    assert_eq!(indented.with_indent(None), plain);
}

#[test]
fn scope_descriptions() {
    let frozen = syntax_config_from_str("if False False True").unwrap();
    assert_eq!(frozen.category(), LineCategory::If);
    assert!(!frozen.complete());
    assert!(frozen.ends_with_open());
    assert!(frozen.opens_scope());
    assert_eq!(frozen.to_string(), "if False False True");

    let else_if = syntax_config_from_str("else-if False True True").unwrap();
    assert_eq!(else_if.category(), LineCategory::ElseIf);
    assert!(else_if.starts_with_close());

    assert_eq!(syntax_config_from_str("if False False"), None);
    assert_eq!(syntax_config_from_str("switch False False True"), None);
}

#[test]
fn parsed_lines_match_their_descriptions() {
    let parsed = config("if (x > 0) {", ConfigKind::Syntax);
    assert_eq!(Some(parsed), syntax_config_from_str("if False False True"));
}

#[test]
fn impossible_scope_descriptions() {
    let check = |s: &str| validate_syntax_config(&syntax_config_from_str(s).unwrap());
    assert!(check("close_curly_only True True False"));
    assert!(!check("close_curly_only True False False"));
    assert!(!check("open_curly_only False False False"));
    assert!(!check("line True False True"));
    assert!(check("line True False False"));
}

fn names() -> impl Strategy<Value = FxHashMap<String, u32>> {
    prop::collection::hash_map("[a-z]{1,4}", 0u32..2, 0..5).prop_map(|m| m.into_iter().collect())
}

fn declared_names() -> impl Strategy<Value = FxHashMap<String, DeclaredName>> {
    let decl = (prop::sample::select(vec!["int", "char", "long long"]), 0u32..2)
        .prop_map(|(base, depth)| DeclaredName { ty: DeclaredType::primitive(base), depth });
    prop::collection::hash_map("[a-z]{1,4}", decl, 0..5).prop_map(|m| m.into_iter().collect())
}

fn projections() -> impl Strategy<Value = Projection> {
    let fields = (declared_names(), names(), prop::option::of("[a-z]{1,4}"));
    let table = prop::option::of(fields.prop_map(|(declared, used, prototype)| TableFields {
        declared,
        used,
        prototype,
    }));
    (
        0..LineCategory::ALL.len(),
        any::<[bool; 4]>(),
        prop::option::of(0u32..6),
        table,
    )
        .prop_map(|(category, [opens, close, open, complete], indent, table)| Projection {
            category: LineCategory::ALL[category],
            opens_scope: opens,
            starts_with_close: close,
            ends_with_open: open,
            complete,
            indent,
            table,
        })
}

proptest! {
    #[test]
    fn unfreeze_inverts_freeze(projection in projections()) {
        prop_assert_eq!(unfreeze(&freeze(&projection)), projection);
    }
}
