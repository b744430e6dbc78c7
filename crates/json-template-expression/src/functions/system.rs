//! `env`, `ifElse`, `uuid`.

use crate::error::FunctionError;
use crate::function::{FunctionParameter, NativeFunction};
use crate::value::{Value, ValueType};
use json_template::Span;
use uuid::Uuid;

fn env_eval(_: &NativeFunction, mut args: Vec<Value>, _: Span) -> Result<Value, FunctionError> {
    let fallback = args.pop().unwrap_or(Value::Null);
    let name = args[0].as_str().unwrap_or_default();
    Ok(std::env::var(name).map(Value::String).unwrap_or(fallback))
}

fn if_else_eval(_: &NativeFunction, args: Vec<Value>, _: Span) -> Result<Value, FunctionError> {
    let mut args = args.into_iter();
    let condition = args.next().and_then(|c| c.as_bool()).unwrap_or(false);
    let then_value = args.next().unwrap_or(Value::Null);
    let else_value = args.next().unwrap_or(Value::Null);
    Ok(if condition { then_value } else { else_value })
}

/// Random version 4 UUID, hyphenated lowercase.
fn uuid_eval(_: &NativeFunction, _: Vec<Value>, _: Span) -> Result<Value, FunctionError> {
    Ok(Value::String(Uuid::new_v4().to_string()))
}

pub fn functions() -> Vec<NativeFunction> {
    vec![
        NativeFunction::new(
            "env",
            vec![
                FunctionParameter::required("name", &[ValueType::String]),
                FunctionParameter::optional(
                    "defaultValue",
                    &[ValueType::String, ValueType::Null],
                    None,
                ),
            ],
            env_eval,
        ),
        NativeFunction::new(
            "ifElse",
            vec![
                FunctionParameter::required("condition", &[ValueType::Boolean]),
                FunctionParameter::required("if", &ValueType::ALL),
                FunctionParameter::required("else", &ValueType::ALL),
            ],
            if_else_eval,
        ),
        NativeFunction::new("uuid", vec![], uuid_eval),
    ]
}
