//! Shopify Admin REST adapter.
//!
//! - [`ShopifyClient`]: product reads and partial updates, metafield writes
//! - [`Metafield`] / [`MetafieldValueType`]: metafield listing entries and
//!   value type inference
//! - [`variants_by_id`] / [`variants_to_list`]: conversion between Shopify's
//!   variant list and the keyed variant map

mod client;
mod metafield;
mod product;

pub use client::{MetafieldWrite, ProductUpdateReport, ShopifyClient};
pub use metafield::{
    key_metafields, metafield_list, metafield_values, wire_value, Metafield, MetafieldValueType,
};
pub use product::{split_product_update, variants_by_id, variants_to_list};
