//! `upper`, `lower`, `concat`, `hash`.

use crate::error::FunctionError;
use crate::function::{FunctionParameter, NativeFunction};
use crate::util::to_display_string;
use crate::value::{Value, ValueType};
use json_template::Span;
use sha2::{Digest, Sha256};

fn upper_eval(_: &NativeFunction, args: Vec<Value>, _: Span) -> Result<Value, FunctionError> {
    Ok(Value::String(args[0].as_str().unwrap_or_default().to_uppercase()))
}

fn lower_eval(_: &NativeFunction, args: Vec<Value>, _: Span) -> Result<Value, FunctionError> {
    Ok(Value::String(args[0].as_str().unwrap_or_default().to_lowercase()))
}

fn concat_eval(_: &NativeFunction, args: Vec<Value>, _: Span) -> Result<Value, FunctionError> {
    let parts = args[0].as_list().unwrap_or_default();
    Ok(Value::String(
        parts.iter().filter_map(Value::as_str).collect::<String>(),
    ))
}

/// Lowercase hex SHA-256 of the UTF-8 text form of the input.
fn hash_eval(_: &NativeFunction, args: Vec<Value>, _: Span) -> Result<Value, FunctionError> {
    let input = to_display_string(&args[0]);
    Ok(Value::String(hex::encode(Sha256::digest(input.as_bytes()))))
}

pub fn functions() -> Vec<NativeFunction> {
    let input = || vec![FunctionParameter::required("input", &[ValueType::String])];
    vec![
        NativeFunction::new("upper", input(), upper_eval),
        NativeFunction::new("lower", input(), lower_eval),
        NativeFunction::new(
            "concat",
            vec![FunctionParameter::required("values", &[ValueType::String]).variadic()],
            concat_eval,
        ),
        NativeFunction::new(
            "hash",
            vec![FunctionParameter::required(
                "input",
                &[ValueType::String, ValueType::Number],
            )],
            hash_eval,
        ),
    ]
}
