//! Credentials handed to the adapters.
//!
//! The Shopify adapter authenticates with the API key and password carried in
//! [`ShopifyConfig`](crate::ShopifyConfig). The eBay adapter asks a
//! [`TokenProvider`] for a bearer [`Token`] on every call; obtaining and
//! refreshing that token is the host's job.
//!
//! # Example
//!
//! ```rust
//! use shopify_ebay_sync::auth::{StaticTokenProvider, Token, TokenProvider};
//!
//! let provider = StaticTokenProvider::new(Token::new("user-access-token"));
//! let token = provider.get_token().unwrap();
//! assert!(!token.is_expired());
//! ```

pub mod token;

pub use token::{StaticTokenProvider, Token, TokenProvider};
