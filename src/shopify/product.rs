//! Translation between Shopify's product wire shape and the keyed shape.
//!
//! Shopify sends and accepts `variants` as a list. Internally a product keeps
//! `variants` as a map from variant id to variant document, and each
//! variant's `metafields` as a `key -> value` map. The functions here convert
//! between the two without dropping any variant field. Map order follows the
//! variant ids, not Shopify's list order.

use serde_json::{Map, Value};

use crate::document::{Document, DocumentExt};
use crate::shopify::metafield::metafield_list;

/// Re-keys a variant list by each variant's `id`.
///
/// Variants without an `id` cannot be addressed and are skipped with a
/// warning.
#[must_use]
pub fn variants_by_id(variants: Vec<Value>) -> Map<String, Value> {
    let mut keyed = Map::new();
    for variant in variants {
        match variant.id_field("id") {
            Some(id) => {
                keyed.insert(id, variant);
            }
            None => tracing::warn!(variant = %variant, "Shopify variant has no id, skipping"),
        }
    }
    keyed
}

/// Expands a keyed variant map into the list Shopify accepts.
///
/// Each entry gets its map key as `id` unless it already carries one, and a
/// `metafields` map is expanded into a metafield list in `namespace`.
#[must_use]
pub fn variants_to_list(variants: &Map<String, Value>, namespace: &str) -> Vec<Value> {
    variants
        .iter()
        .map(|(id, variant)| {
            let mut variant = variant.clone();
            if let Some(fields) = variant.as_object_mut() {
                if !fields.contains_key("id") {
                    fields.insert("id".to_string(), wire_id(id));
                }
                if let Some(Value::Object(metafields)) = fields.get("metafields") {
                    let list = metafield_list(metafields, namespace);
                    fields.insert("metafields".to_string(), Value::Array(list));
                }
            }
            variant
        })
        .collect()
}

/// Prepares a partial product update for the product PUT endpoint.
///
/// Returns the request body and the top-level metafields that must be
/// written separately, since the endpoint ignores them inline.
#[must_use]
pub fn split_product_update(partial: &Document, namespace: &str) -> (Document, Option<Map<String, Value>>) {
    let mut body = partial.clone();

    let metafields = match body.take_field("metafields") {
        Some(Value::Object(metafields)) => Some(metafields),
        Some(other) => {
            tracing::warn!(metafields = %other, "product metafields must be a key/value map, ignoring");
            None
        }
        None => None,
    };

    if let Some(Value::Object(variants)) = body.get("variants") {
        let list = variants_to_list(variants, namespace);
        if let Some(fields) = body.as_object_mut() {
            fields.insert("variants".to_string(), Value::Array(list));
        }
    }

    (body, metafields)
}

/// Shopify ids are numbers on the wire; keep non-numeric keys as strings.
fn wire_id(id: &str) -> Value {
    id.parse::<u64>().map_or_else(|_| Value::String(id.to_string()), Value::from)
}
