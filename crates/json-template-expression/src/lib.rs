//! Expression language embedded in `json-template` strings.
//!
//! Expressions support literals, variables, member and index access,
//! function calls, arithmetic, comparison, logical and conditional
//! operators. They are evaluated against an [`EvaluationContext`] holding
//! variables and registered [`Function`]s.
//!
//! # Example
//!
//! ```
//! use json_template_expression::{evaluate, EvaluationContext, TemplateEvaluator, Value};
//!
//! let mut ctx = EvaluationContext::with_builtins();
//! ctx.set_variable("name", "John");
//! ctx.set_variable("items", vec![Value::from(1), Value::from(2)]);
//!
//! assert_eq!(evaluate("2 + 3 * 4", &ctx).unwrap(), Value::Number(14.0));
//! assert_eq!(evaluate("upper(name)", &ctx).unwrap(), Value::from("JOHN"));
//!
//! let doc = json_template::parse(r#"{"msg": "Hello {{ name }}, {{ len(items) }} items"}"#).unwrap();
//! let template = doc.as_object().unwrap().get_property("msg").unwrap().as_template().unwrap();
//! let text = TemplateEvaluator::new(&ctx).evaluate(template).unwrap();
//! assert_eq!(text, "Hello John, 2 items");
//! ```

pub mod ast;
pub mod cli;
pub mod context;
pub mod convert;
pub mod error;
pub mod evaluate;
pub mod function;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod template;
pub mod token;
pub mod util;
pub mod value;

pub use ast::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use context::EvaluationContext;
pub use convert::json_to_value;
pub use error::{EvalErrorKind, ExpressionError, FunctionError, FunctionErrorKind};
pub use evaluate::{evaluate, Evaluator};
pub use function::{validate_arguments, Function, FunctionParameter, NativeFunction};
pub use functions::{register_builtins, FileReference};
pub use lexer::{tokenize, ExpressionLexer};
pub use parser::{parse, ExpressionParser};
pub use template::{referenced_variables, validate_syntax, TemplateEvaluator, TemplateOutcome};
pub use token::{Token, TokenKind};
pub use value::{OpaqueValue, Value, ValueType};
