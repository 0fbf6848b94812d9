//! Shopify metafields and their value types.
//!
//! Metafields are key/value extension attributes on products and variants.
//! This crate uses the legacy `value_type` vocabulary (`string`,
//! `json_string`, `integer`), inferred from the JSON value being written:
//!
//! | value | `value_type` |
//! |---|---|
//! | array or object | `json_string` |
//! | string that parses as JSON | `json_string` |
//! | integer | `integer` |
//! | anything else | `string` |
//!
//! The type is only sent when a metafield is created. Updates send the value
//! alone, so a metafield keeps the type it was created with.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Legacy metafield value type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetafieldValueType {
    /// Plain text.
    String,
    /// A JSON document stored as text.
    JsonString,
    /// A whole number.
    Integer,
}

impl MetafieldValueType {
    /// Infers the value type for `value`.
    ///
    /// ```rust
    /// use shopify_ebay_sync::shopify::MetafieldValueType;
    /// use serde_json::json;
    ///
    /// assert_eq!(MetafieldValueType::infer(&json!(["a"])), MetafieldValueType::JsonString);
    /// assert_eq!(MetafieldValueType::infer(&json!(r#"{"a":1}"#)), MetafieldValueType::JsonString);
    /// assert_eq!(MetafieldValueType::infer(&json!(3)), MetafieldValueType::Integer);
    /// assert_eq!(MetafieldValueType::infer(&json!("red")), MetafieldValueType::String);
    /// ```
    #[must_use]
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Array(_) | Value::Object(_) => Self::JsonString,
            Value::String(text) if serde_json::from_str::<Value>(text).is_ok() => Self::JsonString,
            Value::Number(number) if number.is_i64() || number.is_u64() => Self::Integer,
            _ => Self::String,
        }
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::JsonString => "json_string",
            Self::Integer => "integer",
        }
    }
}

impl fmt::Display for MetafieldValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metafield as listed by Shopify.
///
/// Only the fields this crate reads are kept; timestamps and owner fields
/// in the reply are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Metafield {
    /// Remote identifier, needed to update an existing metafield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The key, unique within a namespace.
    #[serde(default)]
    pub key: String,

    /// The stored value, as Shopify returns it.
    #[serde(default)]
    pub value: Value,

    /// The stored value type. Kept as text since Shopify may report types
    /// outside [`MetafieldValueType`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// The namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Metafield {
    /// Builds the body for creating a metafield, inferring its type.
    #[must_use]
    pub fn for_create(key: impl Into<String>, value: &Value, namespace: impl Into<String>) -> Self {
        Self {
            id: None,
            key: key.into(),
            value: wire_value(value),
            value_type: Some(MetafieldValueType::infer(value).as_str().to_string()),
            namespace: Some(namespace.into()),
        }
    }

    /// Returns the value converted back from its stored form.
    ///
    /// Shopify returns `integer` metafields as text in some API versions;
    /// those come back as JSON integers. Everything else is returned as
    /// stored.
    #[must_use]
    pub fn typed_value(&self) -> Value {
        if self.value_type.as_deref() == Some(MetafieldValueType::Integer.as_str()) {
            if let Some(number) = self.value.as_str().and_then(|text| text.trim().parse::<i64>().ok()) {
                return Value::from(number);
            }
        }
        self.value.clone()
    }
}

/// Converts a value into the form Shopify stores.
///
/// Collections are serialized to JSON text, strings and integers pass
/// through, and any other scalar is rendered as text.
#[must_use]
pub fn wire_value(value: &Value) -> Value {
    match value {
        Value::String(_) => value.clone(),
        Value::Number(number) if number.is_i64() || number.is_u64() => value.clone(),
        other => Value::String(other.to_string()),
    }
}

/// Keys a metafield listing by `key`.
///
/// When the same key appears in several namespaces, the entry in
/// `preferred_namespace` wins; otherwise the first one listed is kept.
#[must_use]
pub fn key_metafields(
    metafields: Vec<Metafield>,
    preferred_namespace: &str,
) -> HashMap<String, Metafield> {
    let mut keyed: HashMap<String, Metafield> = HashMap::new();
    for metafield in metafields {
        let preferred = metafield.namespace.as_deref() == Some(preferred_namespace);
        match keyed.get(&metafield.key) {
            Some(_) if !preferred => {}
            _ => {
                keyed.insert(metafield.key.clone(), metafield);
            }
        }
    }
    keyed
}

/// Collapses keyed metafields into a `key -> value` map.
#[must_use]
pub fn metafield_values(metafields: &HashMap<String, Metafield>) -> Map<String, Value> {
    metafields
        .iter()
        .map(|(key, metafield)| (key.clone(), metafield.typed_value()))
        .collect()
}

/// Expands a `key -> value` map into the list Shopify accepts inline on a
/// variant.
#[must_use]
pub fn metafield_list(values: &Map<String, Value>, namespace: &str) -> Vec<Value> {
    values
        .iter()
        .filter_map(|(key, value)| {
            serde_json::to_value(Metafield::for_create(key.as_str(), value, namespace)).ok()
        })
        .collect()
}
