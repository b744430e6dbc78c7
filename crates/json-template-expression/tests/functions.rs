use json_template_expression::{evaluate, EvaluationContext, FileReference, Value};
use serde_json::{json, Value as Json};

fn ctx() -> EvaluationContext {
    let mut ctx = EvaluationContext::with_builtins();
    ctx.set_variable("name", "Ann");
    ctx.set_variable("items", Value::from(json!([3, 1, 2])));
    ctx.set_variable("payload", Value::from(json!({"id": 7, "tags": ["a"]})));
    ctx
}

fn check(source: &str, expected: Json) {
    let result = evaluate(source, &ctx())
        .unwrap_or_else(|e| panic!("evaluate({source:?}) failed: {e}"));
    assert_eq!(result.to_json(), expected, "expression: {source}");
}

fn check_err(source: &str) -> String {
    evaluate(source, &ctx())
        .err()
        .unwrap_or_else(|| panic!("expected error for {source:?}"))
        .to_string()
}

#[test]
fn test_builtins_are_opt_in() {
    let ctx = EvaluationContext::new();
    let err = evaluate("upper('x')", &ctx).unwrap_err();
    assert_eq!(err.to_string(), "Function 'upper' not found in context");
    assert!(EvaluationContext::with_builtins().has_function("upper"));
}

#[test]
fn test_string_functions() {
    check("upper(name)", json!("ANN"));
    check("lower('MiXeD')", json!("mixed"));
    check("concat('a', name, 'c')", json!("aAnnc"));
    check("concat('solo')", json!("solo"));
}

#[test]
fn test_string_function_errors() {
    assert_eq!(
        check_err("upper(1)"),
        "Function 'upper': Argument 'input' expects String, but Number was given."
    );
    assert!(check_err("concat()").contains("at least one"));
    assert!(check_err("concat('a', 1)").contains("at index 1"));
    assert_eq!(
        check_err("lower()"),
        "Function 'lower': Missing required argument 'input'."
    );
}

#[test]
fn test_number_functions() {
    check("len(name)", json!(3));
    check("len(items)", json!(3));
    check("len('')", json!(0));
    check("min(4, 2, 9)", json!(2));
    check("max(4, 2, 9)", json!(9));
    check("max(-1)", json!(-1));
    check("min(items[0], items[1]) + 1", json!(2));
}

#[test]
fn test_number_function_errors() {
    assert!(check_err("len(5)").contains("expects String or Array"));
    assert!(check_err("min()").contains("at least one"));
    assert!(check_err("max(1, '2')").contains("expects Number"));
}

#[test]
fn test_json_functions() {
    check("jsonEncode(payload)", json!(r#"{"id":7,"tags":["a"]}"#));
    check("jsonEncode(1.5)", json!("1.5"));
    check("jsonEncode(null)", json!("null"));
    check(r#"jsonDecode('{"a": [1, 2]}')"#, json!({"a": [1, 2]}));
    check(r#"jsonDecode('{"a": [1, 2]}').a[1]"#, json!(2));
    check(r#"jsonDecode('"{{ x }}"')"#, json!("{{x}}"));
}

#[test]
fn test_json_decode_reports_position() {
    let err = check_err("jsonDecode('[1,')");
    assert!(err.starts_with("Function 'jsonDecode': Invalid JSON:"), "got: {}", err);
    assert!(err.ends_with("at 1:4"), "got: {}", err);
}

#[test]
fn test_if_else() {
    check("ifElse(len(name) > 2, 'long', 'short')", json!("long"));
    check("ifElse(false, 1, null)", json!(null));
    assert!(check_err("ifElse(1, 'a', 'b')").contains("'condition' expects Boolean"));
}

#[test]
fn test_env() {
    std::env::set_var("JSON_TEMPLATE_TEST_ENV", "from-env");
    check("env('JSON_TEMPLATE_TEST_ENV')", json!("from-env"));
    check("env('JSON_TEMPLATE_TEST_UNSET_VAR')", json!(null));
    check("env('JSON_TEMPLATE_TEST_UNSET_VAR', 'fallback')", json!("fallback"));
}

#[test]
fn test_uuid_and_timestamp() {
    let ctx = ctx();
    let first = evaluate("uuid()", &ctx).unwrap();
    let second = evaluate("uuid()", &ctx).unwrap();
    assert_eq!(first.as_str().map(str::len), Some(36));
    assert_ne!(first, second);

    let now = evaluate("timestamp()", &ctx).unwrap().as_f64().unwrap();
    assert!(now > 1_600_000_000.0);
    assert!(check_err("uuid(1)").contains("at most 0 argument(s)"));
}

#[test]
fn test_hash() {
    check(
        "hash('abc')",
        json!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"),
    );
    check(
        "hash('')",
        json!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
    );
    let ctx = ctx();
    assert_eq!(
        evaluate("hash(42)", &ctx).unwrap(),
        evaluate("hash('42')", &ctx).unwrap()
    );
    assert!(check_err("hash(null)").contains("'input' expects String or Number"));
}

#[test]
fn test_date_from_unix_seconds() {
    check("date(0)", json!("1970-01-01 00:00:00"));
    check("date(86400, 'yyyy/MM/dd')", json!("1970/01/02"));
    check("date('86400', 'dd MMM yyyy')", json!("02 Jan 1970"));
    check(
        "date(1700000000, 'dddd d MMMM yy h:mm tt')",
        json!("Tuesday 14 November 23 10:13 PM"),
    );
    check(r#"date(0, "yyyy'T'HH:mm")"#, json!("1970T00:00"));
}

#[test]
fn test_date_relative_and_now() {
    let ctx = ctx();
    for source in ["date()", "date('now')", "date('3 days')", "date('-2 hours')"] {
        let text = evaluate(source, &ctx).unwrap();
        assert_eq!(text.as_str().map(str::len), Some(19), "expression: {source}");
    }
    let year = evaluate("date('1 years', 'yyyy')", &ctx).unwrap();
    assert_eq!(year.as_str().map(str::len), Some(4));
}

#[test]
fn test_date_errors() {
    assert_eq!(
        check_err("date('x days')"),
        "Function 'date': The first part of the time must be a number"
    );
    assert_eq!(
        check_err("date('3 fortnights')"),
        "Function 'date': Invalid date format"
    );
    assert_eq!(check_err("date('tomorrow')"), "Function 'date': Invalid date format");
    assert!(check_err("date(true)").contains("'time' expects String or Number"));
}

#[test]
fn test_file_functions() {
    let dir = std::env::temp_dir().join(format!("json-template-files-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("note.txt");
    std::fs::write(&path, "hello file").unwrap();

    let mut ctx = ctx();
    ctx.set_variable("path", path.to_string_lossy().into_owned());

    assert_eq!(evaluate("readFile(path)", &ctx).unwrap(), Value::from("hello file"));

    let value = evaluate("file(path)", &ctx).unwrap();
    let reference = value.as_opaque::<FileReference>().unwrap();
    assert_eq!(reference.file_name, "note.txt");
    assert_eq!(reference.content_type, "text/plain");
    assert_eq!(value.type_name(), "FileReference");

    let value = evaluate("file(path, 'upload.bin', 'application/x-custom')", &ctx).unwrap();
    assert_eq!(
        value.to_json(),
        json!({
            "path": path.to_string_lossy(),
            "fileName": "upload.bin",
            "contentType": "application/x-custom",
        })
    );

    let missing = dir.join("missing.txt");
    ctx.set_variable("missing", missing.to_string_lossy().into_owned());
    let err = evaluate("readFile(missing)", &ctx).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Function 'readFile': File {} not found", missing.display())
    );

    std::fs::remove_dir_all(&dir).unwrap();
}
