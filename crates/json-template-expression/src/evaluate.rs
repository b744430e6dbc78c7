//! Tree-walking evaluator.

use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::context::EvaluationContext;
use crate::error::{EvalErrorKind, ExpressionError};
use crate::parser::ExpressionParser;
use crate::util::{
    compare, format_number, is_truthy, to_display_string, to_number, values_equal,
    NUMBER_TOLERANCE,
};
use crate::value::Value;
use json_template::Span;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Evaluates expressions against a borrowed context.
///
/// Every error carries the span of the sub-expression that failed.
pub struct Evaluator<'a> {
    ctx: &'a EvaluationContext,
}

impl<'a> Evaluator<'a> {
    pub fn new(ctx: &'a EvaluationContext) -> Self {
        Self { ctx }
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value, ExpressionError> {
        match &expr.kind {
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::String(s) => Ok(Value::String(s.clone())),
            ExprKind::Boolean(b) => Ok(Value::Bool(*b)),
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Identifier(name) => self.ctx.get_variable(name, expr.span).cloned(),
            ExprKind::Member { target, name } => self.member(target, name, expr.span),
            ExprKind::Index { target, index } => self.index(target, index, expr.span),
            ExprKind::Call { callee, args } => self.call(callee, args, expr.span),
            ExprKind::Unary { op, operand } => self.unary(*op, operand),
            ExprKind::Binary { op, left, right } => self.binary(*op, left, right, expr.span),
            ExprKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                if is_truthy(&self.evaluate(condition)?) {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            }
        }
    }

    fn member(&self, target: &Expr, name: &str, span: Span) -> Result<Value, ExpressionError> {
        match self.evaluate(target)? {
            Value::Null => Err(ExpressionError::eval(EvalErrorKind::MemberOfNull, span)),
            Value::Map(mut map) => map.swap_remove(name).ok_or_else(|| {
                ExpressionError::eval(EvalErrorKind::PropertyNotFound(name.to_string()), span)
            }),
            other => Err(ExpressionError::eval(
                EvalErrorKind::MemberAccessUnsupported(other.type_name()),
                span,
            )),
        }
    }

    fn index(&self, target: &Expr, index: &Expr, span: Span) -> Result<Value, ExpressionError> {
        let target_value = self.evaluate(target)?;
        let index_value = self.evaluate(index)?;

        match target_value {
            Value::Null => Err(ExpressionError::eval(EvalErrorKind::IndexIntoNull, span)),
            Value::List(mut items) => {
                let position = to_number(&index_value, index.span)?;
                if !position.is_finite() || position.fract() != 0.0 {
                    return Err(ExpressionError::eval(
                        EvalErrorKind::InvalidIndex(format_number(position)),
                        index.span,
                    ));
                }
                if position < 0.0 || position >= items.len() as f64 {
                    return Err(ExpressionError::eval(
                        EvalErrorKind::IndexOutOfRange {
                            index: format_number(position),
                            last: items.len() as i64 - 1,
                        },
                        span,
                    ));
                }
                Ok(items.swap_remove(position as usize))
            }
            Value::Map(mut map) => {
                let key = to_display_string(&index_value);
                map.swap_remove(&key)
                    .ok_or_else(|| ExpressionError::eval(EvalErrorKind::KeyNotFound(key), span))
            }
            other => Err(ExpressionError::eval(
                EvalErrorKind::IndexUnsupported(other.type_name()),
                span,
            )),
        }
    }

    fn call(&self, callee: &Expr, args: &[Expr], span: Span) -> Result<Value, ExpressionError> {
        let ExprKind::Identifier(name) = &callee.kind else {
            return Err(ExpressionError::eval(EvalErrorKind::NotCallable, callee.span));
        };
        let function = self.ctx.get_function(name, span)?;

        let args = args
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<Vec<_>, _>>()?;

        trace!(function = name.as_str(), args = args.len(), "dispatching call");
        Ok(function.call(args, span)?)
    }

    fn unary(&self, op: UnaryOp, operand: &Expr) -> Result<Value, ExpressionError> {
        let value = self.evaluate(operand)?;
        match op {
            UnaryOp::Not => Ok(Value::Bool(!is_truthy(&value))),
            UnaryOp::Negate => Ok(Value::Number(-to_number(&value, operand.span)?)),
        }
    }

    fn binary(
        &self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        span: Span,
    ) -> Result<Value, ExpressionError> {
        let number = |value: &Value, operand: &Expr| to_number(value, operand.span);

        let result = match op {
            BinaryOp::And => return self.logical(left, right, false),
            BinaryOp::Or => return self.logical(left, right, true),
            BinaryOp::Add => {
                let (l, r) = self.operands(left, right)?;
                if matches!(l, Value::String(_)) || matches!(r, Value::String(_)) {
                    let mut s = to_display_string(&l);
                    s.push_str(&to_display_string(&r));
                    Value::String(s)
                } else {
                    Value::Number(to_number(&l, span)? + to_number(&r, span)?)
                }
            }
            BinaryOp::Subtract => {
                let (l, r) = self.operands(left, right)?;
                Value::Number(number(&l, left)? - number(&r, right)?)
            }
            BinaryOp::Multiply => {
                let (l, r) = self.operands(left, right)?;
                Value::Number(number(&l, left)? * number(&r, right)?)
            }
            BinaryOp::Modulo => {
                let (l, r) = self.operands(left, right)?;
                Value::Number(number(&l, left)? % number(&r, right)?)
            }
            BinaryOp::Divide => {
                let (l, r) = self.operands(left, right)?;
                let dividend = number(&l, left)?;
                let divisor = number(&r, right)?;
                if divisor.abs() < NUMBER_TOLERANCE {
                    return Err(ExpressionError::eval(EvalErrorKind::DivisionByZero, span));
                }
                Value::Number(dividend / divisor)
            }
            BinaryOp::Equal => {
                let (l, r) = self.operands(left, right)?;
                Value::Bool(values_equal(&l, &r))
            }
            BinaryOp::NotEqual => {
                let (l, r) = self.operands(left, right)?;
                Value::Bool(!values_equal(&l, &r))
            }
            BinaryOp::LessThan => self.ordering(left, right, span, |o| o == Ordering::Less)?,
            BinaryOp::LessOrEqual => {
                self.ordering(left, right, span, |o| o != Ordering::Greater)?
            }
            BinaryOp::GreaterThan => {
                self.ordering(left, right, span, |o| o == Ordering::Greater)?
            }
            BinaryOp::GreaterOrEqual => {
                self.ordering(left, right, span, |o| o != Ordering::Less)?
            }
        };
        Ok(result)
    }

    fn operands(&self, left: &Expr, right: &Expr) -> Result<(Value, Value), ExpressionError> {
        Ok((self.evaluate(left)?, self.evaluate(right)?))
    }

    /// `&&` (`stop_on == false`) and `||` (`stop_on == true`). The right side
    /// runs only when the left one does not decide the result; the result is
    /// always a boolean.
    fn logical(&self, left: &Expr, right: &Expr, stop_on: bool) -> Result<Value, ExpressionError> {
        if is_truthy(&self.evaluate(left)?) == stop_on {
            return Ok(Value::Bool(stop_on));
        }
        Ok(Value::Bool(is_truthy(&self.evaluate(right)?)))
    }

    fn ordering(
        &self,
        left: &Expr,
        right: &Expr,
        span: Span,
        test: fn(Ordering) -> bool,
    ) -> Result<Value, ExpressionError> {
        let (l, r) = self.operands(left, right)?;
        Ok(Value::Bool(compare(&l, &r, span)?.is_some_and(test)))
    }
}

/// Parses and evaluates `source` in one step.
pub fn evaluate(source: &str, ctx: &EvaluationContext) -> Result<Value, ExpressionError> {
    debug!(source, "evaluating expression");
    let expr = ExpressionParser::parse(source)?;
    Evaluator::new(ctx).evaluate(&expr)
}
