//! Integration tests for `JsonParser`: structure, spans and syntax errors.

use json_template::{parse, JsonValue, JsonValueKind, SyntaxError, SyntaxErrorKind};

fn check(input: &str) -> JsonValue {
    parse(input).unwrap_or_else(|e| panic!("parse({input:?}) failed: {e}"))
}

fn check_err(input: &str) -> SyntaxError {
    parse(input)
        .err()
        .unwrap_or_else(|| panic!("expected error for {input:?}"))
}

// ----------------------------------------------------------------- Scalars

#[test]
fn test_literals() {
    assert!(check("null").is_null());
    assert_eq!(check("true").as_bool(), Some(true));
    assert_eq!(check("false").as_bool(), Some(false));
}

#[test]
fn test_numbers_keep_raw_text() {
    let value = check("-12.50e2");
    let number = value.as_number().unwrap();
    assert_eq!(number.raw, "-12.50e2");
    assert_eq!(number.value, -1250.0);

    assert_eq!(check("0").as_number().unwrap().value, 0.0);
    assert_eq!(check("0.5").as_number().unwrap().value, 0.5);
    assert_eq!(check("1E3").as_number().unwrap().value, 1000.0);
}

#[test]
fn test_leading_zero_is_rejected() {
    let err = check_err("012");
    assert!(matches!(err.kind, SyntaxErrorKind::TrailingTokens(_)), "got: {err}");
    assert_eq!(err.column(), 2);
}

#[test]
fn test_plain_string() {
    let value = check(r#""hello world""#);
    let template = value.as_template().unwrap();
    assert!(!template.has_expressions());
    assert_eq!(template.to_string(), "hello world");
}

#[test]
fn test_empty_string() {
    let value = check(r#""""#);
    assert_eq!(value.as_template().unwrap().to_string(), "");
}

// ----------------------------------------------------------------- Containers

#[test]
fn test_nested_structure() {
    let value = check(
        r#"{
            "name": "api",
            "port": 8080,
            "enabled": true,
            "tags": ["a", "b"],
            "nested": { "deep": null }
        }"#,
    );
    let root = value.as_object().unwrap();
    assert_eq!(root.len(), 5);
    assert_eq!(
        root.keys().collect::<Vec<_>>(),
        vec!["name", "port", "enabled", "tags", "nested"]
    );
    assert_eq!(root.get_property("port").unwrap().as_number().unwrap().value, 8080.0);
    assert_eq!(root.get_property("tags").unwrap().as_array().unwrap().len(), 2);
    let nested = root.get_property("nested").unwrap().as_object().unwrap();
    assert!(nested.get_property("deep").unwrap().is_null());
}

#[test]
fn test_empty_containers() {
    assert!(check("{}").as_object().unwrap().is_empty());
    assert!(check("[ ]").as_array().unwrap().is_empty());
}

#[test]
fn test_trailing_comma_in_array() {
    let err = check_err("[1, 2,]");
    assert!(matches!(err.kind, SyntaxErrorKind::UnexpectedToken(_)), "got: {err}");
    assert_eq!(err.column(), 7);
}

#[test]
fn test_trailing_comma_in_object() {
    let err = check_err(r#"{"key": 123,}"#);
    assert!(matches!(err.kind, SyntaxErrorKind::ExpectedToken { .. }), "got: {err}");
    assert_eq!(err.column(), 13);
}

#[test]
fn test_missing_separators() {
    assert_eq!(check_err("[1 2]").kind, SyntaxErrorKind::ExpectedArraySeparator);
    assert_eq!(
        check_err(r#"{"a": 1 "b": 2}"#).kind,
        SyntaxErrorKind::ExpectedObjectSeparator
    );
    assert!(matches!(
        check_err(r#"{"a" 1}"#).kind,
        SyntaxErrorKind::ExpectedToken { .. }
    ));
}

#[test]
fn test_unclosed_containers() {
    assert!(matches!(check_err("[1, 2").kind, SyntaxErrorKind::ExpectedArraySeparator));
    assert!(matches!(check_err(r#"{"a": 1"#).kind, SyntaxErrorKind::ExpectedObjectSeparator));
}

#[test]
fn test_expression_in_property_name() {
    let err = check_err(r#"{"key{{expr}}": 123}"#);
    assert_eq!(err.kind, SyntaxErrorKind::ExpressionInPropertyName);
    assert_eq!(err.column(), 2);
}

#[test]
fn test_non_string_property_name() {
    assert!(matches!(
        check_err("{1: 2}").kind,
        SyntaxErrorKind::ExpectedToken { .. }
    ));
}

#[test]
fn test_duplicate_property() {
    let err = check_err(r#"{"a": 1, "a": 2}"#);
    assert_eq!(err.kind, SyntaxErrorKind::DuplicateProperty("a".to_string()));
    assert_eq!(err.column(), 10);
}

#[test]
fn test_trailing_tokens() {
    let err = check_err("{} []");
    assert!(matches!(err.kind, SyntaxErrorKind::TrailingTokens(_)));
    assert_eq!(err.column(), 4);
}

#[test]
fn test_empty_input() {
    assert!(matches!(check_err("").kind, SyntaxErrorKind::UnexpectedToken(_)));
    assert!(matches!(check_err("   \n ").kind, SyntaxErrorKind::UnexpectedToken(_)));
}

// ----------------------------------------------------------------- Spans

#[test]
fn test_container_span_runs_from_open_to_close() {
    let value = check("  [1,\n 2 ]");
    assert_eq!(value.span.start, 2);
    assert_eq!(value.span.end(), 10);
    assert_eq!((value.span.start_line, value.span.start_col), (1, 3));
    assert_eq!((value.span.end_line, value.span.end_col), (2, 4));
}

#[test]
fn test_property_span_runs_from_name_to_value() {
    let value = check(r#"{"a": [1]}"#);
    let property = value.as_object().unwrap().property("a").unwrap();
    assert_eq!(property.span.start, 1);
    assert_eq!(property.span.end(), 9);
}

#[test]
fn test_error_position_on_later_line() {
    let err = check_err("{\n  \"a\": 1,\n  \"b\": ?\n}");
    assert_eq!((err.line(), err.column()), (3, 8));
}

#[test]
fn test_templated_values_keep_segments() {
    let value = check(r#"{"url": "{{ base }}/users/{{ id }}"}"#);
    let url = value.as_object().unwrap().get_property("url").unwrap();
    let JsonValueKind::String(template) = &url.kind else {
        panic!("expected a string, got {}", url.type_name());
    };
    assert_eq!(template.segments().len(), 3);
    assert_eq!(template.to_string(), "{{base}}/users/{{id}}");
}
