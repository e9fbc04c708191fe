//! Name/value mappings handed to templates.

use indexmap::IndexMap;

/// A single value a template can reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Name is present but carries no value (`NAME` without `=`).
    Unset,
    Text(String),
    /// Only produced for the `number` naming variable.
    List(Vec<String>),
}

/// Ordered mapping passed to `Template::apply`.
pub type Mapping = IndexMap<String, Value>;

impl Value {
    /// Flat text form used by the placeholder engines.
    pub fn to_text(&self) -> String {
        match self {
            Value::Unset => String::new(),
            Value::Text(text) => text.clone(),
            Value::List(items) => items.join(" "),
        }
    }

    /// JSON form used to build MiniJinja contexts.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Unset => serde_json::Value::Null,
            Value::Text(text) => serde_json::Value::String(text.clone()),
            Value::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .cloned()
                    .map(serde_json::Value::String)
                    .collect(),
            ),
        }
    }
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        value.map(Value::Text).unwrap_or(Value::Unset)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// Converts a mapping into a JSON object, keeping insertion order.
pub fn to_context(mapping: &Mapping) -> serde_json::Value {
    serde_json::Value::Object(
        mapping
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect(),
    )
}
