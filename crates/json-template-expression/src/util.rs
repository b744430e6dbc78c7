//! Coercion rules shared by the evaluator and the built-in functions.

use crate::error::{EvalErrorKind, ExpressionError};
use crate::value::Value;
use json_template::Span;
use std::cmp::Ordering;

/// Two numbers closer than this are equal, and a divisor closer than this to
/// zero is a division by zero. It is the smallest positive `f64`, so in
/// practice both checks are exact.
pub const NUMBER_TOLERANCE: f64 = 5e-324;

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0,
        Value::String(s) => !s.is_empty(),
        Value::List(_) | Value::Map(_) | Value::Opaque(_) => true,
    }
}

/// Numeric view of `value`; `span` locates the operand for the error.
pub fn to_number(value: &Value, span: Span) -> Result<f64, ExpressionError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Null => Ok(0.0),
        Value::String(s) => parse_number(s)
            .ok_or_else(|| ExpressionError::eval(EvalErrorKind::NotANumber(value.type_name()), span)),
        Value::List(_) | Value::Map(_) | Value::Opaque(_) => Err(ExpressionError::eval(
            EvalErrorKind::NotANumber(value.type_name()),
            span,
        )),
    }
}

/// Invariant-culture number text: surrounding whitespace, a leading or
/// trailing sign or enclosing parentheses, `,` group separators in the
/// integer part, a `.` fraction and an exponent. `NaN` and `Infinity` are
/// matched by name, ignoring case.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    let (negative, body) = split_sign(text);
    let magnitude = if body.eq_ignore_ascii_case("infinity") {
        f64::INFINITY
    } else {
        parse_unsigned(body)?
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        return (true, inner);
    }
    if let Some(rest) = text.strip_prefix('-') {
        return (true, rest);
    }
    if let Some(rest) = text.strip_prefix('+') {
        return (false, rest);
    }
    if let Some(rest) = text.strip_suffix('-') {
        return (true, rest);
    }
    (false, text.strip_suffix('+').unwrap_or(text))
}

fn parse_unsigned(body: &str) -> Option<f64> {
    let (mantissa, exponent) = match body.find(|c| c == 'e' || c == 'E') {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (integer, fraction) = match mantissa.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (mantissa, ""),
    };

    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    let integer_ok =
        !integer.starts_with(',') && integer.chars().all(|c| c.is_ascii_digit() || c == ',');
    let has_digits = integer.chars().any(|c| c.is_ascii_digit()) || !fraction.is_empty();
    let exponent_ok = exponent.map_or(true, |e| {
        let e = e.strip_prefix(|c| c == '+' || c == '-').unwrap_or(e);
        !e.is_empty() && digits(e)
    });
    if !(integer_ok && digits(fraction) && has_digits && exponent_ok) {
        return None;
    }
    body.replace(',', "").parse().ok()
}

/// Text form used for concatenation and template output.
pub fn to_display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::List(_) | Value::Map(_) => value.to_json().to_string(),
        Value::Opaque(o) => o.to_string(),
    }
}

/// Shortest round-trip form: `14`, `0.25`, `-3.5`, `Infinity`, `NaN`.
/// Decimal exponents outside `-5 < e < 15` switch to `1E+21` / `1E-05`.
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 || n.is_nan() {
        return n.to_string();
    }
    let scientific = format!("{n:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return n.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return n.to_string();
    };
    if -5 < exponent && exponent < 15 {
        return n.to_string();
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs())
}

pub fn numbers_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < NUMBER_TOLERANCE
}

/// `==` semantics.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Number(a), Value::Number(b)) => numbers_equal(*a, *b),
        _ => left == right,
    }
}

/// Ordering for `< <= > >=`. Numbers compare numerically and strings
/// ordinally; any other pairing cannot be compared. `None` means unordered
/// (a NaN operand), which makes every comparison false.
pub fn compare(left: &Value, right: &Value, span: Span) -> Result<Option<Ordering>, ExpressionError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        _ => Err(ExpressionError::eval(
            EvalErrorKind::CannotCompare {
                left: left.type_name(),
                right: right.type_name(),
            },
            span,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&Value::Number(0.0)));
        assert!(is_truthy(&Value::Number(-2.0)));
        assert!(!is_truthy(&Value::from("")));
        assert!(is_truthy(&Value::from("0")));
        assert!(is_truthy(&Value::List(vec![])));
    }

    #[test]
    fn to_number_coerces_scalars() {
        let span = Span::default();
        assert_eq!(to_number(&Value::from(" 12.5 "), span).unwrap(), 12.5);
        assert_eq!(to_number(&Value::Bool(true), span).unwrap(), 1.0);
        assert_eq!(to_number(&Value::Null, span).unwrap(), 0.0);
        let err = to_number(&Value::from("abc"), span).unwrap_err();
        assert_eq!(err.to_string(), "Cannot convert String to number");
        let err = to_number(&Value::List(vec![]), span).unwrap_err();
        assert_eq!(err.to_string(), "Cannot convert Array to number");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-3.5), "-3.5");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn large_and_small_magnitudes_use_exponents() {
        assert_eq!(format_number(1e21), "1E+21");
        assert_eq!(format_number(1e15), "1E+15");
        assert_eq!(format_number(-2.5e20), "-2.5E+20");
        assert_eq!(format_number(1e300), "1E+300");
        assert_eq!(format_number(123456789012345.0), "123456789012345");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(0.00001), "1E-05");
        assert_eq!(format_number(1.5e-7), "1.5E-07");
    }

    #[test]
    fn number_text_follows_invariant_culture() {
        assert_eq!(parse_number("1,000"), Some(1000.0));
        assert_eq!(parse_number(" 1,234.5 "), Some(1234.5));
        assert_eq!(parse_number("(5)"), Some(-5.0));
        assert_eq!(parse_number("5-"), Some(-5.0));
        assert_eq!(parse_number("+.5"), Some(0.5));
        assert_eq!(parse_number("2.5e3"), Some(2500.0));
        assert_eq!(parse_number("1E-2"), Some(0.01));
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("-infinity"), Some(f64::NEG_INFINITY));
        assert!(parse_number("NaN").is_some_and(f64::is_nan));

        for rejected in ["inf", "-inf", "", ".", "1e", "abc", ",5", "1.2.3", "0x10", "--1"] {
            assert_eq!(parse_number(rejected), None, "{rejected:?}");
        }
    }

    #[test]
    fn display_strings() {
        assert_eq!(to_display_string(&Value::Null), "null");
        assert_eq!(to_display_string(&Value::Bool(false)), "false");
        assert_eq!(
            to_display_string(&Value::List(vec![Value::from(1), Value::from("a")])),
            r#"[1,"a"]"#
        );
    }

    #[test]
    fn equality_rules() {
        assert!(values_equal(&Value::Null, &Value::Null));
        assert!(!values_equal(&Value::Null, &Value::Bool(false)));
        assert!(values_equal(&Value::Number(0.1 + 0.2 - 0.2), &Value::Number(0.1 + 0.2 - 0.2)));
        assert!(!values_equal(&Value::Number(1.0), &Value::from("1")));
        assert!(values_equal(
            &Value::List(vec![Value::from("a")]),
            &Value::List(vec![Value::from("a")])
        ));
    }

    #[test]
    fn ordering_rules() {
        let span = Span::default();
        assert_eq!(
            compare(&Value::from(1), &Value::from(2), span).unwrap(),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare(&Value::from("b"), &Value::from("a"), span).unwrap(),
            Some(Ordering::Greater)
        );
        assert_eq!(compare(&Value::Number(f64::NAN), &Value::from(1), span).unwrap(), None);
        let err = compare(&Value::from(1), &Value::from("1"), span).unwrap_err();
        assert_eq!(err.to_string(), "Cannot compare Number with String");
    }
}
