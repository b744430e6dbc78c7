//! Precedence-climbing parser for the expression language.
//!
//! Tiers, lowest first: `?:`, `||`, `&&`, `== !=`, `< <= > >=`, `+ -`,
//! `* / %`, unary `! -`, postfix `.name [index] (args)`, primary.

use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::lexer::ExpressionLexer;
use crate::token::{Token, TokenKind};
use json_template::{SyntaxError, SyntaxErrorKind};
use tracing::trace;

const EQUALITY: [(TokenKind, BinaryOp); 2] = [
    (TokenKind::Equal, BinaryOp::Equal),
    (TokenKind::NotEqual, BinaryOp::NotEqual),
];

const RELATIONAL: [(TokenKind, BinaryOp); 4] = [
    (TokenKind::LessThan, BinaryOp::LessThan),
    (TokenKind::LessOrEqual, BinaryOp::LessOrEqual),
    (TokenKind::GreaterThan, BinaryOp::GreaterThan),
    (TokenKind::GreaterOrEqual, BinaryOp::GreaterOrEqual),
];

const ADDITIVE: [(TokenKind, BinaryOp); 2] = [
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Subtract),
];

const MULTIPLICATIVE: [(TokenKind, BinaryOp); 3] = [
    (TokenKind::Star, BinaryOp::Multiply),
    (TokenKind::Slash, BinaryOp::Divide),
    (TokenKind::Percent, BinaryOp::Modulo),
];

type ParseFn = fn(&mut ExpressionParser) -> Result<Expr, SyntaxError>;

pub struct ExpressionParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExpressionParser {
    /// Parses a complete expression. Tokens left after it are an error.
    pub fn parse(input: &str) -> Result<Expr, SyntaxError> {
        let tokens = ExpressionLexer::new(input).lex()?;
        trace!(source = input, tokens = tokens.len(), "parsing expression");

        let mut parser = Self { tokens, pos: 0 };
        let expr = parser.parse_expression()?;

        let current = parser.current();
        if current.kind != TokenKind::EndOfFile {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedTokenAfterExpression(current.to_string()),
                current.span,
            ));
        }
        Ok(expr)
    }

    fn current(&self) -> &Token {
        // The token stream always ends with `EndOfFile`, which is never consumed.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::EndOfFile {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if !self.check(kind) {
            let current = self.current();
            return Err(SyntaxError::new(
                SyntaxErrorKind::ExpectedToken {
                    expected: kind.to_string(),
                    found: current.to_string(),
                },
                current.span,
            ));
        }
        Ok(self.advance())
    }

    fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_conditional()
    }

    fn parse_conditional(&mut self) -> Result<Expr, SyntaxError> {
        let condition = self.parse_or()?;
        if !self.check(TokenKind::Question) {
            return Ok(condition);
        }
        self.advance();
        let then_branch = self.parse_expression()?;
        self.eat(TokenKind::Colon)?;
        let else_branch = self.parse_expression()?;

        let span = condition.span.to(else_branch.span);
        Ok(Expr::new(
            ExprKind::Conditional {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        ))
    }

    fn parse_or(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary(Self::parse_and, &[(TokenKind::Or, BinaryOp::Or)])
    }

    fn parse_and(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary(Self::parse_equality, &[(TokenKind::And, BinaryOp::And)])
    }

    fn parse_equality(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary(Self::parse_relational, &EQUALITY)
    }

    fn parse_relational(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary(Self::parse_additive, &RELATIONAL)
    }

    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary(Self::parse_multiplicative, &ADDITIVE)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary(Self::parse_unary, &MULTIPLICATIVE)
    }

    /// One left-associative tier: `next (op next)*`.
    fn parse_binary(
        &mut self,
        next: ParseFn,
        operators: &[(TokenKind, BinaryOp)],
    ) -> Result<Expr, SyntaxError> {
        let mut left = next(self)?;
        loop {
            let kind = self.current().kind;
            let Some(&(_, op)) = operators.iter().find(|(k, _)| *k == kind) else {
                return Ok(left);
            };
            self.advance();
            let right = next(self)?;
            let span = left.span.to(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        let op = match self.current().kind {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Negate,
            _ => return self.parse_postfix(),
        };
        let token = self.advance();
        let operand = self.parse_unary()?;
        let span = token.span.to(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_postfix(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.current().kind {
                TokenKind::Dot => {
                    self.advance();
                    let name = self.parse_member_name()?;
                    let span = expr.span.to(name.span);
                    expr = Expr::new(
                        ExprKind::Member {
                            target: Box::new(expr),
                            name: name.text,
                        },
                        span,
                    );
                }
                TokenKind::LeftBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    let end = self.eat(TokenKind::RightBracket)?;
                    let span = expr.span.to(end.span);
                    expr = Expr::new(
                        ExprKind::Index {
                            target: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                TokenKind::LeftParen => {
                    self.advance();
                    let args = self.parse_arguments()?;
                    let end = self.eat(TokenKind::RightParen)?;
                    let span = expr.span.to(end.span);
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_member_name(&mut self) -> Result<Token, SyntaxError> {
        match self.current().kind {
            TokenKind::Identifier | TokenKind::True | TokenKind::False | TokenKind::Null => {
                Ok(self.advance())
            }
            _ => self.eat(TokenKind::Identifier),
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut args = Vec::new();
        if self.check(TokenKind::RightParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.check(TokenKind::Comma) {
                return Ok(args);
            }
            self.advance();
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.current().clone();
        let kind = match token.kind {
            TokenKind::Number => {
                let value = token
                    .text
                    .parse::<f64>()
                    .map_err(|_| SyntaxError::new(SyntaxErrorKind::InvalidNumber, token.span))?;
                ExprKind::Number(value)
            }
            TokenKind::String => ExprKind::String(token.text.clone()),
            TokenKind::True => ExprKind::Boolean(true),
            TokenKind::False => ExprKind::Boolean(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Identifier => ExprKind::Identifier(token.text.clone()),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.eat(TokenKind::RightParen)?;
                return Ok(inner);
            }
            _ => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::ExpectedExpression(token.to_string()),
                    token.span,
                ))
            }
        };
        self.advance();
        Ok(Expr::new(kind, token.span))
    }
}

/// Parses expression source text into a syntax tree.
pub fn parse(input: &str) -> Result<Expr, SyntaxError> {
    ExpressionParser::parse(input)
}
