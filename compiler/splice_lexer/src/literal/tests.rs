use super::*;
use pretty_assertions::assert_eq;

fn texts(text: &str) -> Vec<&str> {
    split_keep_space(text).into_iter().map(|(s, _)| s).collect()
}

#[test]
fn words_and_spaces_alternate() {
    assert_eq!(texts("hello world"), vec!["hello", " ", "world"]);
    assert_eq!(texts("a  b"), vec!["a", " ", " ", "b"]);
}

#[test]
fn leading_space_gives_empty_segment() {
    assert_eq!(texts(" x"), vec!["", " ", "x"]);
}

#[test]
fn empty_contents() {
    assert_eq!(split_keep_space(""), vec![("", 0)]);
}

#[test]
fn newline_escape_is_split_off() {
    assert_eq!(
        split_keep_space("done\\n"),
        vec![("done", 0), ("\\n", 4)]
    );
    assert_eq!(texts("\\n"), vec!["", "\\n"]);
}

#[test]
fn offsets_cover_the_text() {
    let text = "a b\\n c";
    let segments = split_keep_space(text);
    let joined: String = segments.iter().map(|(s, _)| *s).collect();
    assert_eq!(joined, text);
    for (segment, start) in segments {
        assert_eq!(&text[start..start + segment.len()], segment);
    }
}
