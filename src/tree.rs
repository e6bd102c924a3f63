//! Intermediate tree for parsed configuration documents.
//!
//! Parsers produce a [`ConfigTree`]; the flattener turns it into a
//! [`FlatConfig`](crate::flat::FlatConfig). Object fields keep the order in
//! which they appeared in the source document.

use serde_json::{Number, Value};

/// Reserved key under which a text-block document is stored.
pub const CONTENT_KEY: &str = "content";

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    /// Kept as written in the source document.
    Number(Number),
    String(String),
}

impl Scalar {
    /// Render the value the way a property file would store it.
    pub fn to_property_string(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::String(s) => s.clone(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Number(n) => Value::Number(n.clone()),
            Scalar::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigTree {
    Scalar(Scalar),
    /// Whole document was a single string literal.
    TextBlock(String),
    /// Fields in source order. Keys are unique.
    Object(Vec<(String, ConfigTree)>),
    Array(Vec<ConfigTree>),
}

impl ConfigTree {
    pub fn empty() -> Self {
        ConfigTree::Object(Vec::new())
    }

    /// Convert a JSON value, keeping object field order.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => ConfigTree::Scalar(Scalar::Null),
            Value::Bool(b) => ConfigTree::Scalar(Scalar::Bool(b)),
            Value::Number(n) => ConfigTree::Scalar(Scalar::Number(n)),
            Value::String(s) => ConfigTree::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                ConfigTree::Array(items.into_iter().map(ConfigTree::from_json).collect())
            }
            Value::Object(map) => ConfigTree::Object(
                map.into_iter()
                    .map(|(key, value)| (key, ConfigTree::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Convert back to a JSON value. A text block becomes a JSON string.
    pub fn to_json(&self) -> Value {
        match self {
            ConfigTree::Scalar(scalar) => scalar.to_json(),
            ConfigTree::TextBlock(text) => Value::String(text.clone()),
            ConfigTree::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            ConfigTree::Array(items) => Value::Array(items.iter().map(ConfigTree::to_json).collect()),
        }
    }

    /// Look up a direct child of an object node.
    pub fn get(&self, key: &str) -> Option<&ConfigTree> {
        match self {
            ConfigTree::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Short name of the node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigTree::Scalar(Scalar::Null) => "null",
            ConfigTree::Scalar(Scalar::Bool(_)) => "boolean",
            ConfigTree::Scalar(Scalar::Number(_)) => "number",
            ConfigTree::Scalar(Scalar::String(_)) => "string",
            ConfigTree::TextBlock(_) => "text block",
            ConfigTree::Object(_) => "object",
            ConfigTree::Array(_) => "array",
        }
    }
}
