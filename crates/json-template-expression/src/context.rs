use crate::error::{EvalErrorKind, ExpressionError};
use crate::function::Function;
use crate::value::Value;
use json_template::Span;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Variables and functions visible to expressions.
///
/// A context is plain mutable state owned by the host; it is passed by
/// reference to every evaluation and never shared implicitly.
#[derive(Default, Clone)]
pub struct EvaluationContext {
    variables: HashMap<String, Value>,
    functions: HashMap<String, Arc<dyn Function>>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with the built-in function library registered.
    pub fn with_builtins() -> Self {
        let mut ctx = Self::new();
        crate::functions::register_builtins(&mut ctx);
        ctx
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Looks up a variable; `span` locates the reference for the error.
    pub fn get_variable(&self, name: &str, span: Span) -> Result<&Value, ExpressionError> {
        self.variables.get(name).ok_or_else(|| {
            ExpressionError::eval(EvalErrorKind::VariableNotFound(name.to_string()), span)
        })
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Registers `function` under its own name, replacing any previous one.
    pub fn register_function(&mut self, function: impl Function + 'static) {
        self.register_shared(Arc::new(function));
    }

    pub fn register_shared(&mut self, function: Arc<dyn Function>) {
        self.functions.insert(function.name().to_string(), function);
    }

    pub fn get_function(&self, name: &str, span: Span) -> Result<Arc<dyn Function>, ExpressionError> {
        self.functions.get(name).cloned().ok_or_else(|| {
            ExpressionError::eval(EvalErrorKind::FunctionNotFound(name.to_string()), span)
        })
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

impl fmt::Debug for EvaluationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        functions.sort_unstable();
        f.debug_struct("EvaluationContext")
            .field("variables", &self.variables)
            .field("functions", &functions)
            .finish()
    }
}
