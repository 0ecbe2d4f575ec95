use relevance::base::{TextRange, TextSize};
use relevance::compile;
use relevance::parser::ErrorCode;
use rstest::rstest;

#[rstest]
#[case("", ErrorCode::E0406)]
#[case("name of", ErrorCode::E0406)]
#[case("(1", ErrorCode::E0203)]
#[case("files whose (name of it", ErrorCode::E0203)]
#[case("1 )", ErrorCode::E0205)]
#[case("1 +", ErrorCode::E0402)]
#[case("x and", ErrorCode::E0402)]
#[case("1 < 2 < 3", ErrorCode::E0403)]
#[case("if 1 2", ErrorCode::E0407)]
#[case("if 1 then 2", ErrorCode::E0408)]
#[case("x as", ErrorCode::E0409)]
#[case("x as 1", ErrorCode::E0409)]
#[case("name # x", ErrorCode::E0101)]
#[case("file \"abc", ErrorCode::E0102)]
#[case("$bogus", ErrorCode::E0103)]
#[case("1 2", ErrorCode::E0901)]
fn test_rejected_input(#[case] input: &str, #[case] code: ErrorCode) {
    let err = compile(input).expect_err(input);
    assert_eq!(err.code, code, "input: {input}, error: {err}");
    assert!(err.to_string().starts_with(code.as_str()));
}

#[test]
fn test_unclosed_paren_reports_opening() {
    let err = compile("size of (file \"a\"").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0203);
    assert_eq!(err.related.len(), 1);
    assert_eq!(err.related[0].message, "opened here");
    // preprocessed text is `size $of (file "a"`
    assert_eq!(
        err.related[0].range,
        TextRange::new(TextSize::new(9), TextSize::new(10))
    );
}

#[test]
fn test_error_at_end_of_input_is_empty_range() {
    let err = compile("1 +").unwrap_err();
    assert!(err.range.is_empty());
    assert_eq!(err.range.start(), TextSize::new(3));
}

#[test]
fn test_missing_else_has_hint() {
    let err = compile("if x then y").unwrap_err();
    assert!(err.hint.as_deref().is_some_and(|h| h.contains("else")));
}

#[test]
fn test_deeply_nested_parens_are_rejected() {
    let err = compile(&"(".repeat(10_000)).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0401);

    let err = compile(&format!("{}1", "(".repeat(1_000))).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0401);
}

#[test]
fn test_deeply_nested_operators_are_rejected() {
    let err = compile(&format!("{}x", "not ".repeat(1_000))).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0401);
}

#[rstest]
#[case(format!("x{}", " -> y".repeat(1_000)))]
#[case(format!("1{}", " + 1".repeat(1_000)))]
#[case(format!("files{}", " whose (y)".repeat(1_000)))]
fn test_overlong_chains_are_rejected(#[case] input: String) {
    let err = compile(&input).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0401);
}

#[test]
fn test_moderate_nesting_compiles() {
    let text = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    assert!(compile(&text).is_ok());

    let chain = format!("x{}", " -> y".repeat(100));
    assert!(compile(&chain).is_ok());
}
