//! JSON parser whose string literals may embed `{{ expression }}` placeholders.
//!
//! The parser produces a tree of [`JsonValue`] nodes. Each node carries the
//! [`Span`] of its source text and a hierarchical id (`$`, `$.name`, `$[0]`,
//! composed recursively). String values are [`TemplateString`]s: ordered text
//! and expression segments. Expressions are kept as source text here; the
//! `json-template-expression` crate parses and evaluates them.
//!
//! # Example
//!
//! ```
//! use json_template::{parse, TemplateSegment};
//!
//! let doc = parse(r#"{"greeting": "Hello {{ name }}", "tags": ["a"]}"#).unwrap();
//! let root = doc.as_object().unwrap();
//!
//! let greeting = root.get_property("greeting").unwrap();
//! assert_eq!(greeting.id, "$.greeting");
//!
//! let template = greeting.as_template().unwrap();
//! assert!(template.has_expressions());
//! assert_eq!(template.to_string(), "Hello {{name}}");
//! assert!(matches!(
//!     &template.segments()[1],
//!     TemplateSegment::Expression { source, .. } if source == "name"
//! ));
//!
//! let tag = &root.get_property("tags").unwrap().as_array().unwrap()[0];
//! assert_eq!(tag.id, "$.tags[0]");
//! ```

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod template;
pub mod token;
pub mod value;

pub use cursor::Cursor;
pub use error::{ProcessingError, SyntaxError, SyntaxErrorKind};
pub use lexer::JsonLexer;
pub use parser::JsonParser;
pub use span::Span;
pub use template::{TemplateSegment, TemplateString};
pub use token::{Token, TokenKind};
pub use value::{FromJsonValue, JsonNumber, JsonObject, JsonProperty, JsonValue, JsonValueKind};

/// Parses a complete JSON document.
pub fn parse(input: &str) -> Result<JsonValue, SyntaxError> {
    JsonParser::parse(input)
}
