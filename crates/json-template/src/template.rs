//! Template strings: literal text interleaved with `{{ expression }}` segments.

use crate::span::Span;
use std::fmt;

/// One piece of a [`TemplateString`].
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSegment {
    /// Literal text with escapes already decoded.
    Text { text: String, span: Span },
    /// Trimmed expression source. The span covers the whole `{{ … }}` region.
    Expression { source: String, span: Span },
}

impl TemplateSegment {
    pub fn text(text: impl Into<String>, span: Span) -> Self {
        TemplateSegment::Text {
            text: text.into(),
            span,
        }
    }

    pub fn expression(source: impl Into<String>, span: Span) -> Self {
        TemplateSegment::Expression {
            source: source.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TemplateSegment::Text { span, .. } | TemplateSegment::Expression { span, .. } => *span,
        }
    }
}

/// The value of a JSON string literal.
///
/// `Display` renders the canonical form: text as-is, expressions wrapped in `{{ }}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateString {
    segments: Vec<TemplateSegment>,
}

impl TemplateString {
    pub fn new(segments: Vec<TemplateSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    pub fn has_expressions(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, TemplateSegment::Expression { .. }))
    }

    /// The expression source when the template is exactly one expression and no text.
    pub fn as_single_expression(&self) -> Option<(&str, Span)> {
        match self.segments.as_slice() {
            [TemplateSegment::Expression { source, span }] => Some((source, *span)),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                TemplateSegment::Text { text, .. } => f.write_str(text)?,
                TemplateSegment::Expression { source, .. } => write!(f, "{{{{{source}}}}}")?,
            }
        }
        Ok(())
    }
}

impl From<&str> for TemplateString {
    fn from(text: &str) -> Self {
        if text.is_empty() {
            return TemplateString::default();
        }
        TemplateString::new(vec![TemplateSegment::text(text, Span::default())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_expressions_in_braces() {
        let template = TemplateString::new(vec![
            TemplateSegment::text("Hello ", Span::default()),
            TemplateSegment::expression("name", Span::default()),
        ]);
        assert_eq!(template.to_string(), "Hello {{name}}");
        assert!(template.has_expressions());
    }

    #[test]
    fn text_only_template_has_no_expressions() {
        let template = TemplateString::from("plain");
        assert!(!template.has_expressions());
        assert_eq!(template.to_string(), "plain");
    }

    #[test]
    fn empty_template_renders_empty() {
        let template = TemplateString::default();
        assert_eq!(template.to_string(), "");
        assert!(template.segments().is_empty());
    }

    #[test]
    fn single_expression_is_detected() {
        let span = Span::new(1, 8, 1, 2, 1, 9);
        let template = TemplateString::new(vec![TemplateSegment::expression("items", span)]);
        assert_eq!(template.as_single_expression(), Some(("items", span)));

        let mixed = TemplateString::new(vec![
            TemplateSegment::expression("a", span),
            TemplateSegment::text("!", span),
        ]);
        assert_eq!(mixed.as_single_expression(), None);
    }
}
