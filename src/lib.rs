//! # Shopify ⇄ eBay Sync
//!
//! Keeps product attributes in step between a Shopify store and an eBay
//! seller account: read a product from either side, apply a partial update,
//! and write it back without clobbering the fields the update did not name.
//!
//! ## Overview
//!
//! This crate provides:
//! - A deep merge of partial updates into fetched documents via [`document`]
//! - A Shopify adapter for products, variants and metafields via [`shopify`]
//! - An eBay adapter for inventory items, offers and inventory item groups
//!   via [`ebay`], including item descriptions rendered from Shopify products
//! - One error taxonomy, [`SyncError`], for both vendors' failure vocabularies
//! - Type-safe configuration via [`ShopifyConfig`] and [`EbayConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_ebay_sync::{ApiKey, ApiPassword, ApiVersion, EbayConfig, ShopDomain, ShopifyConfig};
//!
//! let shopify = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("glitchlab").unwrap())
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_password(ApiPassword::new("your-api-password").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! let ebay = EbayConfig::builder()
//!     .marketplace_id("EBAY_US")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Updating Both Sides
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopify_ebay_sync::auth::{StaticTokenProvider, Token};
//! use shopify_ebay_sync::ebay::EbayClient;
//! use shopify_ebay_sync::shopify::ShopifyClient;
//! use serde_json::json;
//!
//! let shopify = ShopifyClient::new(shopify_config)?;
//! let ebay = EbayClient::new(ebay_config, Arc::new(StaticTokenProvider::new(Token::new(token))))?;
//!
//! // Shopify: metafields are written after the product, one key at a time
//! let report = shopify
//!     .set_product_attributes(632910392, &json!({"title": "Brass Lamp", "metafields": {"ebay_sku": "LAMP-01"}}))
//!     .await?;
//!
//! // eBay: the current item is fetched and merged before the full-replace PUT
//! ebay.update_inventory_item("LAMP-01", &json!({"product": {"title": "Brass Lamp"}}))
//!     .await?;
//! ```
//!
//! The two writes are independent; nothing here rolls one back when the
//! other fails.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Clients are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No retries**: Every failure propagates to the caller as a [`SyncError`]

pub mod auth;
pub mod clients;
pub mod config;
pub mod document;
pub mod ebay;
pub mod error;
pub mod shopify;

// Re-export public types at crate root for convenience
pub use auth::{StaticTokenProvider, Token, TokenProvider};
pub use config::{
    ApiKey, ApiPassword, ApiVersion, EbayConfig, EbayConfigBuilder, HostUrl, ShopDomain,
    ShopifyConfig, ShopifyConfigBuilder,
};
pub use document::{merge, merge_with, Document, MergePolicy};
pub use ebay::{classify_ebay_error, render_product_description, EbayClient, Outcome};
pub use error::{ConfigError, Result, SyncError};
pub use shopify::{MetafieldWrite, ProductUpdateReport, ShopifyClient};

// Re-export HTTP client types
pub use clients::{HttpError, InvalidHttpRequestError};
