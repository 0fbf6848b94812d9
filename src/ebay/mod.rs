//! eBay Sell Inventory API adapter.
//!
//! - [`EbayClient`]: inventory items, offers and inventory item groups, with
//!   fetch-merge-put writes and the SKU-to-group lookup fallback
//! - [`classify_ebay_error`] / [`classify_ebay_response`]: maps eBay's numeric
//!   error ids onto [`Outcome`]
//! - [`render_product_description`]: item description HTML from a Shopify
//!   product

mod client;
mod description;
mod errors;

pub use client::{EbayClient, INVENTORY_BASE_PATH};
pub use description::render_product_description;
pub use errors::{
    classify_ebay_error, classify_ebay_response, Outcome, ACCESS_DENIED, ENTITY_NOT_FOUND,
    INVALID_ACCESS_TOKEN, MISSING_ACCESS_TOKEN, SKU_NOT_FOUND,
};
