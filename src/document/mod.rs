//! Untyped vendor documents.
//!
//! Shopify products and eBay inventory items, offers and groups all travel as
//! [`Document`]s: plain JSON trees with no fixed schema. Vendor payloads are
//! heterogeneous and change independently of this crate, so nothing here is
//! forced into structs; the adapters only touch the handful of fields they
//! need through [`DocumentExt`].

mod merge;

pub use merge::{merge, merge_with, merged, MergePolicy, ROOT_PATH};

use serde_json::{Map, Value};

/// A JSON tree as received from, or sent to, a vendor API.
pub type Document = Value;

/// Field accessors used by the adapters.
pub trait DocumentExt {
    /// Returns the string stored under `key`, if it is a string.
    fn str_field(&self, key: &str) -> Option<&str>;

    /// Returns the value under `key` rendered as an identifier.
    ///
    /// Shopify ids are JSON numbers, eBay ids are strings; both come back as
    /// a `String`.
    fn id_field(&self, key: &str) -> Option<String>;

    /// Removes `key` from an object document and returns its value.
    fn take_field(&mut self, key: &str) -> Option<Value>;

    /// Returns the object map, if this document is an object.
    fn fields(&self) -> Option<&Map<String, Value>>;
}

impl DocumentExt for Value {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn id_field(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn take_field(&mut self, key: &str) -> Option<Value> {
        self.as_object_mut().and_then(|map| map.remove(key))
    }

    fn fields(&self) -> Option<&Map<String, Value>> {
        self.as_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_field_accepts_numbers_and_strings() {
        let doc = json!({"id": 632910392, "offerId": "5005317010", "empty": ""});
        assert_eq!(doc.id_field("id"), Some("632910392".to_string()));
        assert_eq!(doc.id_field("offerId"), Some("5005317010".to_string()));
        assert_eq!(doc.id_field("empty"), None);
        assert_eq!(doc.id_field("missing"), None);
    }

    #[test]
    fn test_take_field_removes_key() {
        let mut doc = json!({"title": "Lamp", "variants": {"1": {}}});
        let variants = doc.take_field("variants");
        assert_eq!(variants, Some(json!({"1": {}})));
        assert_eq!(doc, json!({"title": "Lamp"}));
    }

    #[test]
    fn test_take_field_on_non_object_is_none() {
        let mut doc = json!(["a"]);
        assert!(doc.take_field("a").is_none());
    }

    #[test]
    fn test_str_field() {
        let doc = json!({"sku": "A-1", "n": 3});
        assert_eq!(doc.str_field("sku"), Some("A-1"));
        assert_eq!(doc.str_field("n"), None);
    }
}
