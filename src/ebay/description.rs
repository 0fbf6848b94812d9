//! eBay listing descriptions rendered from Shopify products.
//!
//! Templates are Mustache and receive two fields:
//!
//! - `item_name`: the product's `title`
//! - `item_description`: the product's `body_html`
//!
//! `{{item_description}}` is HTML-escaped. Use `{{{item_description}}}` to
//! embed the Shopify HTML as-is.

use serde::Serialize;

use crate::document::{Document, DocumentExt};
use crate::error::Result;

#[derive(Debug, Serialize)]
struct DescriptionFields<'a> {
    item_name: &'a str,
    item_description: &'a str,
}

/// Renders an eBay item description from a Shopify product document.
///
/// A missing `title` or `body_html` renders as an empty string.
///
/// # Errors
///
/// Returns [`SyncError::Template`](crate::SyncError::Template) when the
/// template does not parse.
///
/// # Example
///
/// ```rust
/// use shopify_ebay_sync::ebay::render_product_description;
/// use serde_json::json;
///
/// let product = json!({"title": "Brass Lamp", "body_html": "<p>Bright.</p>"});
/// let html = render_product_description(
///     "<h1>{{item_name}}</h1>{{{item_description}}}",
///     &product,
/// )
/// .unwrap();
/// assert_eq!(html, "<h1>Brass Lamp</h1><p>Bright.</p>");
/// ```
pub fn render_product_description(template: &str, product: &Document) -> Result<String> {
    let fields = DescriptionFields {
        item_name: product.str_field("title").unwrap_or_default(),
        item_description: product.str_field("body_html").unwrap_or_default(),
    };

    let template = mustache::compile_str(template)?;
    let rendered = template.render_to_string(&fields)?;

    tracing::debug!(
        item_name = %fields.item_name,
        length = rendered.len(),
        "rendered eBay item description"
    );
    Ok(rendered)
}
