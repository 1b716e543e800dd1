use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::sample::select;
use splice_lexer::{filter_space, tokenize};

fn lex(source: &str) -> Vec<Token> {
    filter_space(&tokenize(source))
}

fn matched(source: &str) -> TypeMatch {
    let mut tokens = lex(source);
    match_declared_type(&mut tokens, 0, Tables::standard())
}

// === Primitives ===

#[test]
fn longest_spelling_wins() {
    let (ty, end) = matched("long long int x").unwrap().unwrap();
    assert_eq!(ty.base, "long long");
    assert_eq!(end, 2);
}

#[test]
fn spelling_normalization() {
    assert_eq!(normalize_primitive(&["unsigned"]), "int");
    assert_eq!(normalize_primitive(&["int64_t"]), "int");
    assert_eq!(normalize_primitive(&["long", "double"]), "double");
    assert_eq!(normalize_primitive(&["unsigned", "long", "long", "int"]), "long long");
    assert_eq!(normalize_primitive(&["signed", "char"]), "char");
    assert_eq!(normalize_primitive(&["short", "int"]), "short");
    assert_eq!(normalize_primitive(&["int"]), "int");
    assert_eq!(normalize_primitive(&["long", "long", "unsigned"]), "long long unsigned");
}

#[test]
fn qualifiers_and_trailing_const() {
    let (ty, end) = matched("static const int N = 5").unwrap().unwrap();
    assert!(ty.is_static && ty.is_const);
    assert_eq!(end, 2);

    let (ty, end) = matched("char const * p").unwrap().unwrap();
    assert!(ty.is_const);
    assert_eq!(ty.base, "char");
    assert_eq!(end, 1);
}

#[test]
fn non_types_are_a_miss() {
    assert_eq!(matched("x = 1"), Ok(None));
    assert_eq!(matched(""), Ok(None));
    assert_eq!(matched("static"), Ok(None));
    let mut tokens = lex("\"int\"");
    assert_eq!(match_declared_type(&mut tokens, 1, Tables::standard()), Ok(None));
}

// === Containers ===

#[test]
fn nested_generics_split_shift() {
    let mut tokens = lex("vector<vector<int>> grid;");
    let before = tokens.len();
    let (ty, end) = match_declared_type(&mut tokens, 0, Tables::standard())
        .unwrap()
        .unwrap();
    assert_eq!(tokens.len(), before + 1);
    assert_eq!(ty.to_string(), "vector<vector<int>>");
    assert_eq!(tokens[end].text, ">");
    assert_eq!(tokens[end + 1].text, "grid");
}

#[test]
fn map_with_iterator() {
    let (ty, end) = matched("map<string, int>::iterator it").unwrap().unwrap();
    assert!(ty.is_iterator);
    assert_eq!(ty.args.len(), 2);
    assert_eq!(ty.args[0].base, "string");
    assert_eq!(end, 7);
}

#[test]
fn malformed_generics_fail_hard() {
    assert!(matched("vector v").is_err());
    assert!(matched("vector<x> v").is_err());
    assert!(matched("vector<int v").is_err());
    assert!(matched("map<int:int> m").is_err());
    assert!(matched("set<int>::value_type t").is_err());
}

#[test]
fn container_at_end_of_input() {
    let (ty, end) = matched("vector<int>").unwrap().unwrap();
    assert_eq!(ty.base, "vector");
    assert!(!ty.is_iterator);
    assert_eq!(end, 3);
}

#[test]
fn wrong_arity_is_rejected_for_every_container() {
    for (name, arity) in [
        ("vector", 1),
        ("pair", 2),
        ("map", 2),
        ("set", 1),
        ("queue", 1),
        ("stack", 1),
        ("list", 1),
        ("priority_queue", 1),
    ] {
        let too_many = vec!["int"; arity + 1].join(", ");
        assert!(matched(&format!("{name}<{too_many}> x")).is_err(), "{name}");
        if arity > 1 {
            let too_few = vec!["int"; arity - 1].join(", ");
            assert!(matched(&format!("{name}<{too_few}> x")).is_err(), "{name}");
        }
        let exact = vec!["int"; arity].join(", ");
        assert!(matched(&format!("{name}<{exact}> x")).unwrap().is_some(), "{name}");
    }
}

fn arb_type() -> impl Strategy<Value = DeclaredType> {
    let leaf = select(vec!["int", "long long", "char", "double", "string", "bool", "short"])
        .prop_map(DeclaredType::primitive);
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (
                select(vec!["vector", "set", "queue", "stack", "list", "priority_queue"]),
                inner.clone()
            )
                .prop_map(|(name, arg)| DeclaredType::container(name, vec![arg])),
            (select(vec!["pair", "map"]), inner.clone(), inner)
                .prop_map(|(name, a, b)| DeclaredType::container(name, vec![a, b])),
        ]
    })
}

proptest! {
    #[test]
    fn display_round_trips(base in arb_type(), is_const in any::<bool>(), iter in any::<bool>()) {
        let ty = DeclaredType {
            is_const,
            is_iterator: iter && base.is_container(),
            ..base
        };
        let text = ty.to_string();
        let mut tokens = lex(&text);
        let result = match_declared_type(&mut tokens, 0, Tables::standard());
        let (parsed, end) = result.unwrap().unwrap();
        prop_assert_eq!(end, tokens.len() - 1);
        prop_assert_eq!(parsed, ty);
    }
}
