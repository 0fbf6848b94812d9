//! Error types for the sync bridge.
//!
//! Two families live here:
//!
//! - [`ConfigError`]: validation failures while building connection
//!   configuration.
//! - [`SyncError`]: the single taxonomy every adapter operation reports.
//!   Shopify status codes and eBay numeric error ids are both translated into
//!   it, so callers only ever match on one enum.
//!
//! # Example
//!
//! ```rust
//! use shopify_ebay_sync::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

use crate::clients::HttpError;

/// Convenience alias used by every adapter operation.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that can occur while building configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Shopify API key.")]
    EmptyApiKey,

    /// API password cannot be empty.
    #[error("API password cannot be empty. Please provide the private app password.")]
    EmptyApiPassword,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2026-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.ebay.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Metafield namespace cannot be empty.
    #[error("Metafield namespace cannot be empty.")]
    EmptyMetafieldNamespace,
}

/// Failure taxonomy shared by the Shopify and eBay adapters.
///
/// Every remote failure carries the vendor's original message or body so it
/// can be logged or shown to an operator without another round trip. Nothing
/// in this crate retries; each variant propagates straight to the caller.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote rejected, or did not receive, valid credentials.
    #[error("Authentication failed: {message}")]
    AuthenticationFailure {
        /// Vendor message describing the rejection.
        message: String,
    },

    /// The remote has no such resource.
    #[error("Item not found: {message}")]
    ItemNotFound {
        /// Vendor message, or a description of the lookup that failed.
        message: String,
    },

    /// A strict merge found two different leaf values for the same key.
    #[error("Merge conflict at '{path}'")]
    MergeConflict {
        /// Dotted path to the conflicting key.
        path: String,
    },

    /// The remote reported an error this crate has no mapping for.
    #[error("Unexpected remote error (status {status}): {raw}")]
    UnexpectedRemoteError {
        /// HTTP status of the reply.
        status: u16,
        /// The full reply body.
        raw: serde_json::Value,
    },

    /// The reply body could not be parsed as JSON.
    #[error("Unparseable reply (status {status}): {body}")]
    TransportFailure {
        /// HTTP status of the reply.
        status: u16,
        /// The raw reply text.
        body: String,
    },

    /// Network failure or invalid request before any reply was received.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// An item description template failed to parse or render.
    #[error("Template error: {0}")]
    Template(#[from] mustache::Error),
}

impl SyncError {
    /// Maps a non-2xx Shopify reply onto the shared taxonomy.
    ///
    /// - 401 / 403 -> [`SyncError::AuthenticationFailure`]
    /// - 404 -> [`SyncError::ItemNotFound`]
    /// - anything else -> [`SyncError::UnexpectedRemoteError`]
    ///
    /// Shopify puts its messages under `errors` (string, list or map); that
    /// payload is used as the message when present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_ebay_sync::SyncError;
    /// use serde_json::json;
    ///
    /// let error = SyncError::from_shopify_response(
    ///     404,
    ///     &json!({"errors": "Not Found"}),
    ///     "Product",
    ///     "123",
    /// );
    /// assert!(matches!(error, SyncError::ItemNotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_shopify_response(
        status: u16,
        body: &serde_json::Value,
        resource: &'static str,
        id: &str,
    ) -> Self {
        let detail = body.get("errors").map_or_else(
            || body.to_string(),
            |errors| {
                errors
                    .as_str()
                    .map_or_else(|| errors.to_string(), ToString::to_string)
            },
        );

        match status {
            401 | 403 => Self::AuthenticationFailure { message: detail },
            404 => Self::ItemNotFound {
                message: format!("{resource} with id {id} not found: {detail}"),
            },
            _ => Self::UnexpectedRemoteError {
                status,
                raw: body.clone(),
            },
        }
    }

    /// Returns `true` for [`SyncError::ItemNotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound { .. })
    }

    /// Returns `true` for [`SyncError::AuthenticationFailure`].
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailure { .. })
    }
}
