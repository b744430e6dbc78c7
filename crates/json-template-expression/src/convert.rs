//! Conversion of a parsed JSON tree into runtime values.

use crate::context::EvaluationContext;
use crate::error::ExpressionError;
use crate::template::TemplateEvaluator;
use crate::value::Value;
use indexmap::IndexMap;
use json_template::{JsonValue, JsonValueKind};

/// Converts `json` into a [`Value`].
///
/// With a context, strings containing expressions are evaluated (a string
/// that is a single expression keeps the expression's type). Without one,
/// strings become their canonical template text.
pub fn json_to_value(
    json: &JsonValue,
    ctx: Option<&EvaluationContext>,
) -> Result<Value, ExpressionError> {
    let value = match &json.kind {
        JsonValueKind::Null => Value::Null,
        JsonValueKind::Boolean(b) => Value::Bool(*b),
        JsonValueKind::Number(n) => Value::Number(n.value),
        JsonValueKind::String(template) => match ctx {
            Some(ctx) if template.has_expressions() => {
                TemplateEvaluator::new(ctx).evaluate_value(template)?
            }
            _ => Value::String(template.to_string()),
        },
        JsonValueKind::Array(items) => Value::List(
            items
                .iter()
                .map(|item| json_to_value(item, ctx))
                .collect::<Result<_, _>>()?,
        ),
        JsonValueKind::Object(object) => {
            let mut map = IndexMap::with_capacity(object.len());
            for property in object.properties() {
                map.insert(property.name.clone(), json_to_value(&property.value, ctx)?);
            }
            Value::Map(map)
        }
    };
    Ok(value)
}
