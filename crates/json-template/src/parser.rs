//! Recursive-descent JSON parser.

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::lexer::JsonLexer;
use crate::token::{Token, TokenKind};
use crate::value::{JsonNumber, JsonObject, JsonProperty, JsonValue, JsonValueKind};
use tracing::debug;

/// JSON parser over a pre-lexed token stream.
pub struct JsonParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl JsonParser {
    /// Parses a complete document. Tokens left after the root value are an error.
    pub fn parse(input: &str) -> Result<JsonValue, SyntaxError> {
        let tokens = JsonLexer::new(input).lex()?;
        debug!(bytes = input.len(), tokens = tokens.len(), "parsing json");

        let mut parser = Self { tokens, pos: 0 };
        let value = parser.parse_value("$".to_string())?;

        if parser.current().kind != TokenKind::EndOfFile {
            let token = parser.current();
            return Err(SyntaxError::new(
                SyntaxErrorKind::TrailingTokens(token.kind.to_string()),
                token.span,
            ));
        }
        Ok(value)
    }

    fn current(&self) -> &Token {
        // The lexer always terminates the stream with `EndOfFile` and the parser never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.current().span)
    }

    fn eat(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        let current = self.current();
        if current.kind != kind {
            return Err(self.error(SyntaxErrorKind::ExpectedToken {
                expected: kind.to_string(),
                found: current.kind.to_string(),
            }));
        }
        let token = current.clone();
        if token.kind != TokenKind::EndOfFile {
            self.pos += 1;
        }
        Ok(token)
    }

    fn parse_value(&mut self, id: String) -> Result<JsonValue, SyntaxError> {
        match self.current().kind {
            TokenKind::LeftBrace => self.parse_object(id),
            TokenKind::LeftBracket => self.parse_array(id),
            TokenKind::String => self.parse_string(id),
            TokenKind::Number => self.parse_number(id),
            TokenKind::True | TokenKind::False | TokenKind::Null => self.parse_literal(id),
            other => Err(self.error(SyntaxErrorKind::UnexpectedToken(other.to_string()))),
        }
    }

    fn parse_object(&mut self, id: String) -> Result<JsonValue, SyntaxError> {
        let start = self.eat(TokenKind::LeftBrace)?;
        let mut object = JsonObject::new();

        if self.current().kind == TokenKind::RightBrace {
            let end = self.eat(TokenKind::RightBrace)?;
            return Ok(JsonValue::new(
                JsonValueKind::Object(object),
                start.span.to(end.span),
                id,
            ));
        }

        loop {
            let name_token = self.eat(TokenKind::String)?;
            let template = name_token.template.unwrap_or_default();
            if template.has_expressions() {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::ExpressionInPropertyName,
                    name_token.span,
                ));
            }
            let name = template.to_string();

            self.eat(TokenKind::Colon)?;
            let value = self.parse_value(format!("{id}.{name}"))?;
            let span = name_token.span.to(value.span);

            if let Err(rejected) = object.insert(JsonProperty { name, value, span }) {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::DuplicateProperty(rejected.name),
                    name_token.span,
                ));
            }

            match self.current().kind {
                TokenKind::Comma => {
                    self.eat(TokenKind::Comma)?;
                }
                TokenKind::RightBrace => {
                    let end = self.eat(TokenKind::RightBrace)?;
                    return Ok(JsonValue::new(
                        JsonValueKind::Object(object),
                        start.span.to(end.span),
                        id,
                    ));
                }
                _ => return Err(self.error(SyntaxErrorKind::ExpectedObjectSeparator)),
            }
        }
    }

    fn parse_array(&mut self, id: String) -> Result<JsonValue, SyntaxError> {
        let start = self.eat(TokenKind::LeftBracket)?;
        let mut items = Vec::new();

        if self.current().kind == TokenKind::RightBracket {
            let end = self.eat(TokenKind::RightBracket)?;
            return Ok(JsonValue::new(
                JsonValueKind::Array(items),
                start.span.to(end.span),
                id,
            ));
        }

        loop {
            let item = self.parse_value(format!("{id}[{}]", items.len()))?;
            items.push(item);

            match self.current().kind {
                TokenKind::Comma => {
                    self.eat(TokenKind::Comma)?;
                }
                TokenKind::RightBracket => {
                    let end = self.eat(TokenKind::RightBracket)?;
                    return Ok(JsonValue::new(
                        JsonValueKind::Array(items),
                        start.span.to(end.span),
                        id,
                    ));
                }
                _ => return Err(self.error(SyntaxErrorKind::ExpectedArraySeparator)),
            }
        }
    }

    fn parse_string(&mut self, id: String) -> Result<JsonValue, SyntaxError> {
        let token = self.eat(TokenKind::String)?;
        let template = token.template.unwrap_or_default();
        Ok(JsonValue::new(JsonValueKind::String(template), token.span, id))
    }

    fn parse_number(&mut self, id: String) -> Result<JsonValue, SyntaxError> {
        let token = self.eat(TokenKind::Number)?;
        let raw = token.text.unwrap_or_default();
        let value = raw
            .parse::<f64>()
            .map_err(|_| SyntaxError::new(SyntaxErrorKind::InvalidNumber, token.span))?;
        Ok(JsonValue::new(
            JsonValueKind::Number(JsonNumber { raw, value }),
            token.span,
            id,
        ))
    }

    fn parse_literal(&mut self, id: String) -> Result<JsonValue, SyntaxError> {
        let kind = self.current().kind;
        let token = self.eat(kind)?;
        let value = match kind {
            TokenKind::True => JsonValueKind::Boolean(true),
            TokenKind::False => JsonValueKind::Boolean(false),
            _ => JsonValueKind::Null,
        };
        Ok(JsonValue::new(value, token.span, id))
    }
}
