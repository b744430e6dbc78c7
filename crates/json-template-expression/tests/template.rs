use json_template::{TemplateSegment, TemplateString};
use json_template_expression::{
    json_to_value, referenced_variables, validate_syntax, EvaluationContext, ExpressionError,
    TemplateEvaluator, Value,
};
use serde_json::json;

/// Parses `body` as the contents of a JSON string literal.
fn template(body: &str) -> TemplateString {
    let doc = json_template::parse(&format!("\"{body}\"")).unwrap();
    doc.as_template().unwrap().clone()
}

fn ctx() -> EvaluationContext {
    let mut ctx = EvaluationContext::with_builtins();
    ctx.set_variable("name", "John");
    ctx.set_variable("count", 3.0);
    ctx.set_variable("items", Value::from(json!(["a", "b"])));
    ctx
}

#[test]
fn test_segments_render_in_order() {
    let t = template("Hello {{name}}");
    assert!(matches!(
        t.segments(),
        [TemplateSegment::Text { text, .. }, TemplateSegment::Expression { source, .. }]
            if text == "Hello " && source == "name"
    ));
    assert_eq!(TemplateEvaluator::new(&ctx()).evaluate(&t).unwrap(), "Hello John");
    assert_eq!(t.to_string(), "Hello {{name}}");
}

#[test]
fn test_values_are_stringified() {
    let ctx = ctx();
    let evaluator = TemplateEvaluator::new(&ctx);
    let t = template("{{ count }} of {{ items }}: {{ count / 2 }} {{ null }} {{ count > 1 }}");
    assert_eq!(evaluator.evaluate(&t).unwrap(), r#"3 of ["a","b"]: 1.5 null true"#);
}

#[test]
fn test_plain_text_passes_through() {
    let ctx = ctx();
    let t = template("no expressions here");
    assert!(!t.has_expressions());
    assert_eq!(
        TemplateEvaluator::new(&ctx).evaluate(&t).unwrap(),
        "no expressions here"
    );
}

#[test]
fn test_single_expression_keeps_type() {
    let ctx = ctx();
    let evaluator = TemplateEvaluator::new(&ctx);
    assert_eq!(
        evaluator.evaluate_value(&template("{{ count * 2 }}")).unwrap(),
        Value::Number(6.0)
    );
    assert_eq!(
        evaluator.evaluate_value(&template("{{ items }}")).unwrap(),
        Value::from(json!(["a", "b"]))
    );
    assert_eq!(
        evaluator.evaluate_value(&template("n={{ count }}")).unwrap(),
        Value::from("n=3")
    );
}

#[test]
fn test_errors_point_at_segment() {
    let ctx = ctx();
    let t = template("Hello {{ missing }}");
    let err = TemplateEvaluator::new(&ctx).evaluate(&t).unwrap_err();
    assert_eq!(err.to_string(), "Variable 'missing' not found in context");
    assert_eq!((err.line(), err.column()), (1, 8));
}

#[test]
fn test_syntax_errors_point_at_segment() {
    let ctx = ctx();
    let t = template("ok {{ 1 + }}");
    let err = TemplateEvaluator::new(&ctx).evaluate(&t).unwrap_err();
    assert!(matches!(err, ExpressionError::Syntax(_)), "got: {err:?}");
    assert_eq!(err.column(), 5);
}

#[test]
fn test_try_evaluate() {
    let ctx = ctx();
    let evaluator = TemplateEvaluator::new(&ctx);

    let outcome = evaluator.try_evaluate(&template("{{ upper(name) }}!"));
    assert!(outcome.is_success());
    assert_eq!(outcome.value(), Some("JOHN!"));
    assert!(outcome.error().is_none());

    let outcome = evaluator.try_evaluate(&template("{{ 1 / 0 }}"));
    assert!(!outcome.is_success());
    assert_eq!(outcome.value(), None);
    assert_eq!(outcome.error().unwrap().to_string(), "Division by zero");
    assert!(outcome.into_result().is_err());
}

#[test]
fn test_validate_syntax_does_not_evaluate() {
    assert!(validate_syntax(&template("{{ undefinedVariable + 1 }} and {{ f(x) }}")).is_ok());
    let err = validate_syntax(&template("fine {{ a }} broken {{ (a }}")).unwrap_err();
    assert!(matches!(err, ExpressionError::Syntax(_)));
    assert_eq!(err.column(), 22);
}

#[test]
fn test_referenced_variables() {
    let t = template("{{ user.name }} {{ upper(title) }} {{ items[idx] }} {{ user.age > min ? a : b }}");
    let names: Vec<String> = referenced_variables(&t).into_iter().collect();
    assert_eq!(names, ["user", "upper", "title", "items", "idx", "min", "a", "b"]);
}

#[test]
fn test_referenced_variables_include_call_roots() {
    let t = template("{{ upper(name) }} {{ f(x).y }}");
    let names: Vec<String> = referenced_variables(&t).into_iter().collect();
    assert_eq!(names, ["upper", "name", "f", "x"]);
}

#[test]
fn test_referenced_variables_skips_broken_segments() {
    let t = template("{{ first }} {{ + }} {{ second }}");
    let names: Vec<String> = referenced_variables(&t).into_iter().collect();
    assert_eq!(names, ["first", "second"]);
}

#[test]
fn test_document_conversion() {
    let ctx = ctx();
    let doc = json_template::parse(
        r#"{"user": "{{ name }}", "n": "{{ count + 1 }}", "tags": ["{{ items[0] }}", 2.50], "msg": "hi {{ name }}"}"#,
    )
    .unwrap();
    let value = json_to_value(&doc, Some(&ctx)).unwrap();
    assert_eq!(
        value.to_json(),
        json!({"user": "John", "n": 4, "tags": ["a", 2.5], "msg": "hi John"})
    );

    let raw = json_to_value(&doc, None).unwrap();
    assert_eq!(raw.to_json()["msg"], json!("hi {{name}}"));
}
