#![allow(clippy::unwrap_used)]

use relevance::parser::{SyntaxKind, preprocess, tokenize};
use rstest::rstest;

use crate::helpers::compile;

fn sexpr(text: &str) -> String {
    let ast = compile(text);
    ast.sexpr(ast.root())
}

// ============================================================================
// Mirror forms
// ============================================================================

#[rstest]
#[case("name of file \"a\"", "file \"a\" -> name")]
#[case("name of file \"a\"", "file \"a\".name")]
#[case("name of file \"a\"", "file \"a\"'s name")]
#[case("size of file \"a\"", "file \"a\"' size")]
#[case("names of files of folder \"c\"", "folder \"c\" -> files -> names")]
#[case("its name", "it -> name")]
#[case("line 3 of file \"a\"", "file \"a\" -> line 3")]
fn test_of_and_arrow_forms_build_same_tree(#[case] of_form: &str, #[case] arrow_form: &str) {
    let left = compile(of_form);
    let right = compile(arrow_form);
    assert!(
        left.same_shape(&right),
        "{} != {}",
        left.sexpr(left.root()),
        right.sexpr(right.root())
    );
    assert_eq!(left.kind(left.root()).tag(), "property");
}

// ============================================================================
// Shapes
// ============================================================================

#[rstest]
#[case("file \"a\"", r#"(phrase "file" (string "a"))"#)]
#[case("system folder", r#"(phrase "system folder")"#)]
#[case("line 3 of file \"a\"", r#"(property (phrase "line" (number 3)) (phrase "file" (string "a")))"#)]
#[case("its size", r#"(property (phrase "size") (it))"#)]
#[case(
    "names of files of folder \"c\"",
    r#"(property (phrase "names") (property (phrase "files") (phrase "folder" (string "c"))))"#
)]
#[case(
    "files whose (size of it > 10)",
    r#"(whose (phrase "files") (parens (binary ">" (property (phrase "size") (it)) (number 10))))"#
)]
#[case(
    "files whose (x) whose (y)",
    r#"(whose (whose (phrase "files") (parens (phrase "x"))) (parens (phrase "y")))"#
)]
#[case("x is not equal to y", r#"(binary "is not equal to" (phrase "x") (phrase "y"))"#)]
#[case("name of it contains \"a\"", r#"(binary "contains" (property (phrase "name") (it)) (string "a"))"#)]
#[case("exists file \"a\"", r#"(unary "exists" (phrase "file" (string "a")))"#)]
#[case("there exists no file \"a\"", r#"(unary "not exists" (phrase "file" (string "a")))"#)]
#[case("file \"a\" -> exists", r#"(unary "exists" (phrase "file" (string "a")))"#)]
#[case("not exists file \"a\"", r#"(unary "not" (unary "exists" (phrase "file" (string "a"))))"#)]
#[case("-1", r#"(unary "-" (number 1))"#)]
#[case("1 + 2 * 3", r#"(binary "+" (number 1) (binary "*" (number 2) (number 3)))"#)]
#[case("1 - 2 - 3", r#"(binary "-" (binary "-" (number 1) (number 2)) (number 3))"#)]
#[case("\"a\" & \"b\"", r#"(binary "&" (string "a") (string "b"))"#)]
#[case("7 mod 2", r#"(binary "mod" (number 7) (number 2))"#)]
#[case("x and y or z", r#"(binary "or" (binary "and" (phrase "x") (phrase "y")) (phrase "z"))"#)]
#[case("1, 2, 3", r#"(tuple (number 1) (number 2) (number 3))"#)]
#[case("1, 2; 3", r#"(collection (tuple (number 1) (number 2)) (number 3))"#)]
#[case("name of file \"a\" as string", r#"(cast "string" (property (phrase "name") (phrase "file" (string "a"))))"#)]
#[case("if x then 1 else 2", r#"(if (phrase "x") (number 1) (number 2))"#)]
#[case("name of ?", r#"(property (phrase "name") (type-hint))"#)]
#[case("? of file \"a\"", r#"(property (type-hint) (phrase "file" (string "a")))"#)]
#[case("files whose ?", r#"(whose (phrase "files") (type-hint))"#)]
#[case("file ?", r#"(phrase "file" (type-hint))"#)]
fn test_tree_shape(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sexpr(input), expected, "input: {input}");
}

#[test]
fn test_articles_are_dropped() {
    assert_eq!(sexpr("name of a file \"a\""), sexpr("name of file \"a\""));
    assert_eq!(sexpr("an x"), sexpr("x"));
}

#[test]
fn test_keywords_inside_strings_are_kept() {
    assert_eq!(sexpr("file \"name of it\""), r#"(phrase "file" (string "name of it"))"#);
}

#[test]
fn test_keyword_only_matches_whole_words() {
    // `office` and `items` contain keywords but are plain words
    assert_eq!(sexpr("office items"), r#"(phrase "office items")"#);
}

#[test]
fn test_preprocessed_tokens() {
    let text = preprocess("name of file \"a\" is not \"b\"");
    let kinds: Vec<_> = tokenize(&text).into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PHRASE,
            SyntaxKind::OF_KW,
            SyntaxKind::PHRASE,
            SyntaxKind::STRING,
            SyntaxKind::RELATION,
            SyntaxKind::STRING,
            SyntaxKind::EOF,
        ]
    );
}

#[test]
fn test_node_ranges_refer_to_preprocessed_text() {
    let text = "size of file \"a\"";
    let preprocessed = preprocess(text);
    let ast = compile(text);
    let root = ast.node(ast.root());
    assert_eq!(usize::from(root.range.end()), preprocessed.len());
    assert_eq!(usize::from(root.range.start()), 0);
}
