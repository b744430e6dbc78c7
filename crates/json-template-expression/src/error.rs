use json_template::{Span, SyntaxError};
use thiserror::Error;

/// Runtime failures of the evaluator itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalErrorKind {
    #[error("Variable '{0}' not found in context")]
    VariableNotFound(String),

    #[error("Function '{0}' not found in context")]
    FunctionNotFound(String),

    #[error("Only named functions can be called")]
    NotCallable,

    #[error("Cannot convert {0} to number")]
    NotANumber(&'static str),

    #[error("Cannot compare {left} with {right}")]
    CannotCompare {
        left: &'static str,
        right: &'static str,
    },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Cannot access member of null")]
    MemberOfNull,

    #[error("Property '{0}' not found")]
    PropertyNotFound(String),

    #[error("Member access is only supported on maps, found {0}; use a map for nested data")]
    MemberAccessUnsupported(&'static str),

    #[error("Cannot index into null")]
    IndexIntoNull,

    #[error("Cannot index into {0}")]
    IndexUnsupported(&'static str),

    #[error("Invalid index {0}, expected a whole number")]
    InvalidIndex(String),

    #[error("Index {index} out of range [0..{last}]")]
    IndexOutOfRange { index: String, last: i64 },

    #[error("Key '{0}' not found")]
    KeyNotFound(String),
}

/// Argument validation failures and errors raised by function bodies.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionErrorKind {
    #[error("Missing required argument '{0}'.")]
    MissingArgument(String),

    #[error("Argument '{parameter}' expects {expected}, but {actual} was given.")]
    InvalidArgumentType {
        parameter: String,
        expected: String,
        actual: &'static str,
    },

    #[error("Variadic argument '{parameter}' at index {index} expects {expected}, but {actual} was given.")]
    InvalidVariadicArgumentType {
        parameter: String,
        index: usize,
        expected: String,
        actual: &'static str,
    },

    #[error("Variadic argument '{0}' requires at least one value.")]
    EmptyVariadic(String),

    #[error("Expects at most {expected} argument(s), but {given} were given.")]
    TooManyArguments { expected: usize, given: usize },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("{0}")]
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Function '{function}': {kind}")]
pub struct FunctionError {
    pub function: String,
    pub kind: FunctionErrorKind,
    pub span: Span,
}

impl FunctionError {
    pub fn new(function: impl Into<String>, kind: FunctionErrorKind, span: Span) -> Self {
        Self {
            function: function.into(),
            kind,
            span,
        }
    }
}

/// Any failure while parsing or evaluating an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("{kind}")]
    Evaluation { kind: EvalErrorKind, span: Span },

    #[error(transparent)]
    Function(#[from] FunctionError),
}

impl ExpressionError {
    pub fn eval(kind: EvalErrorKind, span: Span) -> Self {
        ExpressionError::Evaluation { kind, span }
    }

    pub fn span(&self) -> Span {
        match self {
            ExpressionError::Syntax(e) => e.span,
            ExpressionError::Evaluation { span, .. } => *span,
            ExpressionError::Function(e) => e.span,
        }
    }

    pub fn line(&self) -> usize {
        self.span().start_line
    }

    pub fn column(&self) -> usize {
        self.span().start_col
    }

    /// Moves the error to `span`, keeping its kind and message.
    pub(crate) fn with_span(mut self, new_span: Span) -> Self {
        match &mut self {
            ExpressionError::Syntax(e) => e.span = new_span,
            ExpressionError::Evaluation { span, .. } => *span = new_span,
            ExpressionError::Function(e) => e.span = new_span,
        }
        self
    }
}
