//! `len`, `min`, `max`.

use crate::error::FunctionError;
use crate::function::{Function, FunctionParameter, NativeFunction};
use crate::value::{Value, ValueType};
use json_template::Span;

fn len_eval(f: &NativeFunction, args: Vec<Value>, span: Span) -> Result<Value, FunctionError> {
    match &args[0] {
        Value::String(s) => Ok(Value::Number(s.chars().count() as f64)),
        Value::List(items) => Ok(Value::Number(items.len() as f64)),
        _ => Err(f.error("len requires a string or array", span)),
    }
}

fn numbers(args: &[Value]) -> impl Iterator<Item = f64> + '_ {
    args[0].as_list().unwrap_or_default().iter().filter_map(Value::as_f64)
}

fn min_eval(f: &NativeFunction, args: Vec<Value>, span: Span) -> Result<Value, FunctionError> {
    numbers(&args)
        .reduce(f64::min)
        .map(Value::Number)
        .ok_or_else(|| f.error("min requires at least one argument", span))
}

fn max_eval(f: &NativeFunction, args: Vec<Value>, span: Span) -> Result<Value, FunctionError> {
    numbers(&args)
        .reduce(f64::max)
        .map(Value::Number)
        .ok_or_else(|| f.error("max requires at least one argument", span))
}

pub fn functions() -> Vec<NativeFunction> {
    let numbers = || vec![FunctionParameter::required("numbers", &[ValueType::Number]).variadic()];
    vec![
        NativeFunction::new(
            "len",
            vec![FunctionParameter::required(
                "value",
                &[ValueType::String, ValueType::Array],
            )],
            len_eval,
        ),
        NativeFunction::new("min", numbers(), min_eval),
        NativeFunction::new("max", numbers(), max_eval),
    ]
}
