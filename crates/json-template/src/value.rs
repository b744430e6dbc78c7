//! Parsed JSON tree. Every node carries its span and hierarchical id.

use crate::error::ProcessingError;
use crate::span::Span;
use crate::template::TemplateString;
use indexmap::IndexMap;

/// A JSON number, keeping the source text alongside its parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonNumber {
    pub raw: String,
    pub value: f64,
}

/// An object member.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonProperty {
    pub name: String,
    pub value: JsonValue,
    /// From the start of the name to the end of the value.
    pub span: Span,
}

/// An object. Members keep their source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonObject {
    properties: IndexMap<String, JsonProperty>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValueKind {
    Null,
    Boolean(bool),
    Number(JsonNumber),
    String(TemplateString),
    Array(Vec<JsonValue>),
    Object(JsonObject),
}

/// A node of the parsed tree.
///
/// `id` is `$` for the root, `{parent}.{name}` for object members and
/// `{parent}[{index}]` for array items.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonValue {
    pub kind: JsonValueKind,
    pub span: Span,
    pub id: String,
}

impl JsonValueKind {
    /// Fixed display name of the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValueKind::Null => "JsonNull",
            JsonValueKind::Boolean(_) => "JsonBoolean",
            JsonValueKind::Number(_) => "JsonNumber",
            JsonValueKind::String(_) => "JsonString",
            JsonValueKind::Array(_) => "JsonArray",
            JsonValueKind::Object(_) => "JsonObject",
        }
    }
}

impl JsonValue {
    pub fn new(kind: JsonValueKind, span: Span, id: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            id: id.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, JsonValueKind::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            JsonValueKind::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&JsonNumber> {
        match &self.kind {
            JsonValueKind::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_template(&self) -> Option<&TemplateString> {
        match &self.kind {
            JsonValueKind::String(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match &self.kind {
            JsonValueKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match &self.kind {
            JsonValueKind::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Finds the descendant (or self) with the given hierarchical id.
    pub fn find(&self, id: &str) -> Option<&JsonValue> {
        if self.id == id {
            return Some(self);
        }
        if !id.starts_with(self.id.as_str()) {
            return None;
        }
        match &self.kind {
            JsonValueKind::Array(items) => items.iter().find_map(|item| item.find(id)),
            JsonValueKind::Object(obj) => obj.values().find_map(|value| value.find(id)),
            _ => None,
        }
    }
}

impl JsonObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member; returns the rejected property when the name is taken.
    pub fn insert(&mut self, property: JsonProperty) -> Result<(), JsonProperty> {
        if self.properties.contains_key(&property.name) {
            return Err(property);
        }
        self.properties.insert(property.name.clone(), property);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn get_property(&self, name: &str) -> Option<&JsonValue> {
        self.properties.get(name).map(|p| &p.value)
    }

    pub fn property(&self, name: &str) -> Option<&JsonProperty> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &JsonProperty> {
        self.properties.values()
    }

    pub fn values(&self) -> impl Iterator<Item = &JsonValue> {
        self.properties.values().map(|p| &p.value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Looks up a member and views it as `T`.
    ///
    /// Returns `Ok(None)` when the member is absent and a [`ProcessingError`]
    /// pointing at the stored value when it has another type.
    pub fn try_get_property<'a, T: FromJsonValue<'a>>(
        &'a self,
        name: &str,
    ) -> Result<Option<T>, ProcessingError> {
        let Some(value) = self.get_property(name) else {
            return Ok(None);
        };
        T::from_json_value(value).map(Some).ok_or_else(|| {
            ProcessingError::new(
                format!("Property '{}' is not of type '{}'", name, T::TYPE_NAME),
                value.span,
            )
        })
    }

    /// Like [`JsonObject::try_get_property`], but a missing member is an error
    /// anchored at `object_span`.
    pub fn require_property<'a, T: FromJsonValue<'a>>(
        &'a self,
        name: &str,
        object_span: Span,
    ) -> Result<T, ProcessingError> {
        self.try_get_property(name)?.ok_or_else(|| {
            ProcessingError::new(format!("Missing required property '{}'", name), object_span)
        })
    }
}

/// Typed views over a [`JsonValue`], used by the property accessors.
pub trait FromJsonValue<'a>: Sized {
    const TYPE_NAME: &'static str;

    fn from_json_value(value: &'a JsonValue) -> Option<Self>;
}

impl<'a> FromJsonValue<'a> for &'a JsonValue {
    const TYPE_NAME: &'static str = "JsonValue";

    fn from_json_value(value: &'a JsonValue) -> Option<Self> {
        Some(value)
    }
}

impl<'a> FromJsonValue<'a> for &'a JsonObject {
    const TYPE_NAME: &'static str = "JsonObject";

    fn from_json_value(value: &'a JsonValue) -> Option<Self> {
        value.as_object()
    }
}

impl<'a> FromJsonValue<'a> for &'a [JsonValue] {
    const TYPE_NAME: &'static str = "JsonArray";

    fn from_json_value(value: &'a JsonValue) -> Option<Self> {
        value.as_array()
    }
}

impl<'a> FromJsonValue<'a> for &'a TemplateString {
    const TYPE_NAME: &'static str = "JsonString";

    fn from_json_value(value: &'a JsonValue) -> Option<Self> {
        value.as_template()
    }
}

impl<'a> FromJsonValue<'a> for &'a JsonNumber {
    const TYPE_NAME: &'static str = "JsonNumber";

    fn from_json_value(value: &'a JsonValue) -> Option<Self> {
        value.as_number()
    }
}

impl<'a> FromJsonValue<'a> for f64 {
    const TYPE_NAME: &'static str = "JsonNumber";

    fn from_json_value(value: &'a JsonValue) -> Option<Self> {
        value.as_number().map(|n| n.value)
    }
}

impl<'a> FromJsonValue<'a> for bool {
    const TYPE_NAME: &'static str = "JsonBoolean";

    fn from_json_value(value: &'a JsonValue) -> Option<Self> {
        value.as_bool()
    }
}
