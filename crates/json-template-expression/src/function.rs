//! Function contract and argument validation.
//!
//! A function declares its parameters; [`Function::call`] validates the raw
//! call arguments against them and only then runs [`Function::execute`].
//! Validation:
//!
//! 1. at most one variadic parameter, and it must be the last one;
//! 2. each fixed parameter takes its argument, or its default when optional,
//!    and the argument's type must be one of the allowed ones;
//! 3. a variadic parameter collects every remaining argument into a single
//!    [`Value::List`] occupying its slot, each item type-checked, and a
//!    required variadic needs at least one item;
//! 4. without a variadic parameter, extra arguments are an error.

use crate::error::{FunctionError, FunctionErrorKind};
use crate::value::{Value, ValueType};
use json_template::Span;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParameter {
    pub name: String,
    pub allowed_types: Vec<ValueType>,
    pub required: bool,
    /// Substituted for a missing optional argument; `None` means `null`.
    pub default: Option<Value>,
    pub variadic: bool,
}

impl FunctionParameter {
    pub fn required(name: impl Into<String>, allowed_types: &[ValueType]) -> Self {
        Self {
            name: name.into(),
            allowed_types: allowed_types.to_vec(),
            required: true,
            default: None,
            variadic: false,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        allowed_types: &[ValueType],
        default: Option<Value>,
    ) -> Self {
        Self {
            required: false,
            default,
            ..Self::required(name, allowed_types)
        }
    }

    /// Marks the parameter as absorbing all remaining arguments.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn accepts(&self, value: &Value) -> bool {
        ValueType::of(value).is_some_and(|t| self.allowed_types.contains(&t))
    }

    /// `String or Number` style list of the allowed types.
    pub fn expected_types(&self) -> String {
        self.allowed_types
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

/// A named function callable from expressions.
pub trait Function: Send + Sync {
    fn name(&self) -> &str;

    fn parameters(&self) -> &[FunctionParameter];

    /// Runs the body with arguments already validated by [`Function::call`]:
    /// one value per declared parameter, a variadic slot holding a list.
    fn execute(&self, args: Vec<Value>, span: Span) -> Result<Value, FunctionError>;

    fn call(&self, args: Vec<Value>, span: Span) -> Result<Value, FunctionError> {
        let args = validate_arguments(self.name(), self.parameters(), args, span)?;
        trace!(function = self.name(), args = args.len(), "calling function");
        self.execute(args, span)
    }

    /// Builds an error from the function body.
    fn error(&self, message: impl Into<String>, span: Span) -> FunctionError
    where
        Self: Sized,
    {
        FunctionError::new(self.name(), FunctionErrorKind::Failed(message.into()), span)
    }
}

/// Checks `args` against `parameters` and returns the argument list the
/// function body receives.
pub fn validate_arguments(
    function: &str,
    parameters: &[FunctionParameter],
    args: Vec<Value>,
    span: Span,
) -> Result<Vec<Value>, FunctionError> {
    let fail = |kind| FunctionError::new(function, kind, span);

    let variadic = parameters.iter().position(|p| p.variadic);
    if let Some(index) = variadic {
        if index != parameters.len() - 1 {
            return Err(fail(FunctionErrorKind::InvalidSignature(format!(
                "variadic parameter '{}' must be the last parameter",
                parameters[index].name
            ))));
        }
    }

    let fixed = &parameters[..variadic.unwrap_or(parameters.len())];
    let given = args.len();
    let mut args = args.into_iter();
    let mut validated = Vec::with_capacity(parameters.len());

    for parameter in fixed {
        match args.next() {
            Some(arg) => {
                if !parameter.accepts(&arg) {
                    return Err(fail(FunctionErrorKind::InvalidArgumentType {
                        parameter: parameter.name.clone(),
                        expected: parameter.expected_types(),
                        actual: arg.type_name(),
                    }));
                }
                validated.push(arg);
            }
            None if parameter.required => {
                return Err(fail(FunctionErrorKind::MissingArgument(
                    parameter.name.clone(),
                )));
            }
            None => validated.push(parameter.default.clone().unwrap_or(Value::Null)),
        }
    }

    let Some(index) = variadic else {
        if given > fixed.len() {
            return Err(fail(FunctionErrorKind::TooManyArguments {
                expected: fixed.len(),
                given,
            }));
        }
        return Ok(validated);
    };

    let parameter = &parameters[index];
    let rest: Vec<Value> = args.collect();
    if rest.is_empty() && parameter.required {
        return Err(fail(FunctionErrorKind::EmptyVariadic(parameter.name.clone())));
    }
    if let Some((i, arg)) = rest.iter().enumerate().find(|(_, a)| !parameter.accepts(a)) {
        return Err(fail(FunctionErrorKind::InvalidVariadicArgumentType {
            parameter: parameter.name.clone(),
            index: i,
            expected: parameter.expected_types(),
            actual: arg.type_name(),
        }));
    }
    validated.push(Value::List(rest));

    Ok(validated)
}

/// Body of a [`NativeFunction`].
pub type NativeBody = fn(&NativeFunction, Vec<Value>, Span) -> Result<Value, FunctionError>;

/// A function backed by a plain `fn`, the way the built-in library is defined.
pub struct NativeFunction {
    name: &'static str,
    parameters: Vec<FunctionParameter>,
    body: NativeBody,
}

impl NativeFunction {
    pub fn new(name: &'static str, parameters: Vec<FunctionParameter>, body: NativeBody) -> Self {
        Self {
            name,
            parameters,
            body,
        }
    }
}

impl Function for NativeFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn parameters(&self) -> &[FunctionParameter] {
        &self.parameters
    }

    fn execute(&self, args: Vec<Value>, span: Span) -> Result<Value, FunctionError> {
        (self.body)(self, args, span)
    }
}
