//! Evaluation of [`TemplateString`]s.
//!
//! Errors raised inside an expression segment are reported at that
//! segment's span in the JSON source.

use crate::ast::{Expr, ExprKind};
use crate::context::EvaluationContext;
use crate::error::ExpressionError;
use crate::evaluate::Evaluator;
use crate::parser::ExpressionParser;
use crate::util::to_display_string;
use crate::value::Value;
use indexmap::IndexSet;
use json_template::{Span, TemplateSegment, TemplateString};
use tracing::{debug, trace};

/// Result of [`TemplateEvaluator::try_evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateOutcome {
    Success(String),
    Failure(ExpressionError),
}

impl TemplateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TemplateOutcome::Success(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            TemplateOutcome::Success(s) => Some(s),
            TemplateOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ExpressionError> {
        match self {
            TemplateOutcome::Success(_) => None,
            TemplateOutcome::Failure(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<String, ExpressionError> {
        match self {
            TemplateOutcome::Success(s) => Ok(s),
            TemplateOutcome::Failure(e) => Err(e),
        }
    }
}

pub struct TemplateEvaluator<'a> {
    ctx: &'a EvaluationContext,
}

impl<'a> TemplateEvaluator<'a> {
    pub fn new(ctx: &'a EvaluationContext) -> Self {
        Self { ctx }
    }

    /// Renders the template: text as-is, expression results stringified.
    pub fn evaluate(&self, template: &TemplateString) -> Result<String, ExpressionError> {
        let mut out = String::new();
        for segment in template.segments() {
            match segment {
                TemplateSegment::Text { text, .. } => out.push_str(text),
                TemplateSegment::Expression { source, span } => {
                    let value = self.evaluate_segment(source, *span)?;
                    out.push_str(&to_display_string(&value));
                }
            }
        }
        Ok(out)
    }

    /// Like [`TemplateEvaluator::evaluate`], but a template made of a single
    /// expression yields that expression's value unchanged.
    pub fn evaluate_value(&self, template: &TemplateString) -> Result<Value, ExpressionError> {
        match template.as_single_expression() {
            Some((source, span)) => self.evaluate_segment(source, span),
            None => self.evaluate(template).map(Value::String),
        }
    }

    pub fn try_evaluate(&self, template: &TemplateString) -> TemplateOutcome {
        match self.evaluate(template) {
            Ok(s) => TemplateOutcome::Success(s),
            Err(e) => {
                debug!(error = %e, "template evaluation failed");
                TemplateOutcome::Failure(e)
            }
        }
    }

    fn evaluate_segment(&self, source: &str, span: Span) -> Result<Value, ExpressionError> {
        trace!(source, line = span.start_line, column = span.start_col, "evaluating segment");
        let expr = parse_segment(source, span)?;
        Evaluator::new(self.ctx)
            .evaluate(&expr)
            .map_err(|e| e.with_span(span))
    }
}

fn parse_segment(source: &str, span: Span) -> Result<Expr, ExpressionError> {
    ExpressionParser::parse(source).map_err(|e| ExpressionError::from(e).with_span(span))
}

/// Parses every expression segment without evaluating it and reports the
/// first syntax error.
pub fn validate_syntax(template: &TemplateString) -> Result<(), ExpressionError> {
    for segment in template.segments() {
        if let TemplateSegment::Expression { source, span } = segment {
            parse_segment(source, *span)?;
        }
    }
    Ok(())
}

/// Names of the variables the template reads, in order of first use.
///
/// Only the root of a member, index or call chain counts (`user.name` reads
/// `user`, `upper(name)` reads `upper` and `name`). Segments that fail to
/// parse are skipped.
pub fn referenced_variables(template: &TemplateString) -> IndexSet<String> {
    let mut names = IndexSet::new();
    for segment in template.segments() {
        if let TemplateSegment::Expression { source, .. } = segment {
            if let Ok(expr) = ExpressionParser::parse(source) {
                collect_variables(&expr, &mut names);
            }
        }
    }
    names
}

fn collect_variables(expr: &Expr, names: &mut IndexSet<String>) {
    match &expr.kind {
        ExprKind::Number(_) | ExprKind::String(_) | ExprKind::Boolean(_) | ExprKind::Null => {}
        ExprKind::Identifier(name) => {
            names.insert(name.clone());
        }
        ExprKind::Member { target, .. } => collect_variables(target, names),
        ExprKind::Index { target, index } => {
            collect_variables(target, names);
            collect_variables(index, names);
        }
        ExprKind::Call { callee, args } => {
            collect_variables(callee, names);
            for arg in args {
                collect_variables(arg, names);
            }
        }
        ExprKind::Unary { operand, .. } => collect_variables(operand, names),
        ExprKind::Binary { left, right, .. } => {
            collect_variables(left, names);
            collect_variables(right, names);
        }
        ExprKind::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            collect_variables(condition, names);
            collect_variables(then_branch, names);
            collect_variables(else_branch, names);
        }
    }
}
