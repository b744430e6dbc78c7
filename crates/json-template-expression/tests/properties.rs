use json_template_expression::{evaluate, parse, EvaluationContext, Value};
use proptest::prelude::*;

fn ctx(a: i32, b: i32) -> EvaluationContext {
    let mut ctx = EvaluationContext::new();
    ctx.set_variable("a", a);
    ctx.set_variable("b", b);
    ctx
}

proptest! {
    #[test]
    fn integer_arithmetic_matches_native(a in -10_000i32..10_000, b in -10_000i32..10_000) {
        let ctx = ctx(a, b);
        let (a, b) = (a as f64, b as f64);
        prop_assert_eq!(evaluate("a + b", &ctx).unwrap(), Value::Number(a + b));
        prop_assert_eq!(evaluate("a - b * 2", &ctx).unwrap(), Value::Number(a - b * 2.0));
        prop_assert_eq!(evaluate("(a - b) * 2", &ctx).unwrap(), Value::Number((a - b) * 2.0));
        prop_assert_eq!(evaluate("a < b", &ctx).unwrap(), Value::Bool(a < b));
        prop_assert_eq!(evaluate("a == b", &ctx).unwrap(), Value::Bool(a == b));
    }

    #[test]
    fn division_by_zero_is_always_an_error(a in any::<i32>()) {
        let ctx = ctx(a, 0);
        let err = evaluate("a / b", &ctx).unwrap_err();
        prop_assert_eq!(err.to_string(), "Division by zero");
    }

    #[test]
    fn string_literals_evaluate_to_their_text(s in "[a-zA-Z0-9 .,:;!?-]{0,24}") {
        let ctx = EvaluationContext::new();
        prop_assert_eq!(evaluate(&format!("'{s}'"), &ctx).unwrap(), Value::String(s.clone()));
        prop_assert_eq!(
            evaluate(&format!("\"{s}\" + 1"), &ctx).unwrap(),
            Value::String(format!("{s}1"))
        );
    }

    #[test]
    fn parser_never_panics(source in "[a-z0-9 +*/%()\\[\\].,?:!<>=&|'-]{0,24}") {
        let _ = parse(&source);
    }

    #[test]
    fn printed_trees_reparse_to_the_same_shape(a in 0u32..1000, b in 0u32..1000, c in 0u32..1000) {
        let source = format!("{a} + {b} * {c} > {a} ? {b} : {c} - 1");
        let expr = parse(&source).unwrap();
        let printed = expr.to_string();
        prop_assert_eq!(parse(&printed).unwrap().to_string(), printed);
    }
}
