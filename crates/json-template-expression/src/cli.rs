//! Logic behind the `json-template-render` binary.
//!
//! Reads a templated JSON document, evaluates every string against the
//! given variables and the built-in functions, and prints plain JSON.

use crate::context::EvaluationContext;
use crate::convert::json_to_value;
use crate::error::ExpressionError;
use crate::value::Value;
use json_template::SyntaxError;
use std::fmt;
use std::sync::Once;
use tracing::debug;

pub const USAGE: &str = "Usage: json-template-render [--var name=value]... [--raw] < input.json";

#[derive(Debug)]
pub enum CliError {
    Usage(String),
    Syntax(SyntaxError),
    Expression(ExpressionError),
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage(e) => write!(f, "{e}\n{USAGE}"),
            CliError::Syntax(e) => write!(f, "{} at {}:{}", e, e.line(), e.column()),
            CliError::Expression(e) => write!(f, "{} at {}:{}", e, e.line(), e.column()),
            CliError::Json(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<SyntaxError> for CliError {
    fn from(e: SyntaxError) -> Self {
        CliError::Syntax(e)
    }
}

impl From<ExpressionError> for CliError {
    fn from(e: ExpressionError) -> Self {
        CliError::Expression(e)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderOptions {
    pub variables: Vec<(String, Value)>,
    /// Keep template strings as text instead of evaluating them.
    pub raw: bool,
}

/// Parses command-line arguments, program name excluded.
pub fn parse_args<I>(args: I) -> Result<RenderOptions, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = RenderOptions::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--raw" => options.raw = true,
            "--var" => {
                let binding = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--var needs a name=value argument".into()))?;
                options.variables.push(parse_binding(&binding)?);
            }
            other => {
                if let Some(binding) = other.strip_prefix("--var=") {
                    options.variables.push(parse_binding(binding)?);
                } else {
                    return Err(CliError::Usage(format!("Unknown argument '{other}'")));
                }
            }
        }
    }
    Ok(options)
}

/// `name=value`, where the value is read as JSON and otherwise taken as text.
fn parse_binding(binding: &str) -> Result<(String, Value), CliError> {
    let (name, raw) = binding
        .split_once('=')
        .ok_or_else(|| CliError::Usage(format!("Expected name=value, got '{binding}'")))?;
    if name.is_empty() {
        return Err(CliError::Usage(format!("Missing variable name in '{binding}'")));
    }
    let value = serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}

/// Renders `input` to pretty-printed JSON.
pub fn render(input: &str, options: &RenderOptions) -> Result<String, CliError> {
    let doc = json_template::parse(input)?;

    let mut ctx = EvaluationContext::with_builtins();
    for (name, value) in &options.variables {
        ctx.set_variable(name.clone(), value.clone());
    }
    debug!(variables = options.variables.len(), raw = options.raw, "rendering document");

    let value = json_to_value(&doc, (!options.raw).then_some(&ctx))?;
    Ok(serde_json::to_string_pretty(&value.to_json())?)
}

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber filtered by `RUST_LOG`, when it is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
