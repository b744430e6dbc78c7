//! `jsonEncode`, `jsonDecode`.

use crate::convert::json_to_value;
use crate::error::FunctionError;
use crate::function::{Function, FunctionParameter, NativeFunction};
use crate::value::{Value, ValueType};
use json_template::Span;

fn json_encode_eval(
    f: &NativeFunction,
    args: Vec<Value>,
    span: Span,
) -> Result<Value, FunctionError> {
    serde_json::to_string(&args[0].to_json())
        .map(Value::String)
        .map_err(|e| f.error(format!("Cannot encode value: {e}"), span))
}

/// Decoded strings keep any `{{ }}` placeholders as plain text.
fn json_decode_eval(
    f: &NativeFunction,
    args: Vec<Value>,
    span: Span,
) -> Result<Value, FunctionError> {
    let text = args[0].as_str().unwrap_or_default();
    let doc = json_template::parse(text).map_err(|e| {
        f.error(
            format!("Invalid JSON: {} at {}:{}", e, e.line(), e.column()),
            span,
        )
    })?;
    json_to_value(&doc, None).map_err(|e| f.error(e.to_string(), span))
}

pub fn functions() -> Vec<NativeFunction> {
    vec![
        NativeFunction::new(
            "jsonEncode",
            vec![FunctionParameter::required("value", &ValueType::ALL)],
            json_encode_eval,
        ),
        NativeFunction::new(
            "jsonDecode",
            vec![FunctionParameter::required("json", &[ValueType::String])],
            json_decode_eval,
        ),
    ]
}
