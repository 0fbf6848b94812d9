//! Connection configuration for the two vendor APIs.
//!
//! Configuration is instance-based: each adapter receives its config at
//! construction and nothing is read from process-wide state.
//!
//! - [`ShopifyConfig`] / [`ShopifyConfigBuilder`]: shop domain, private-app
//!   credentials, API version and metafield namespace
//! - [`EbayConfig`] / [`EbayConfigBuilder`]: Sell Inventory API root and
//!   marketplace header
//!
//! # Example
//!
//! ```rust
//! use shopify_ebay_sync::{ApiKey, ApiPassword, ShopDomain, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("glitchlab").unwrap())
//!     .api_key(ApiKey::new("key").unwrap())
//!     .api_password(ApiPassword::new("password").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.metafield_namespace(), "global");
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiKey, ApiPassword, HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Namespace used for metafields created by this crate unless overridden.
pub const DEFAULT_METAFIELD_NAMESPACE: &str = "global";

/// Production root of the eBay REST APIs.
pub const EBAY_PRODUCTION_URL: &str = "https://api.ebay.com";

/// Sandbox root of the eBay REST APIs.
pub const EBAY_SANDBOX_URL: &str = "https://api.sandbox.ebay.com";

/// Configuration for the Shopify adapter.
///
/// The Admin API is reached with HTTP Basic auth using a private app's API
/// key and password.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    shop: ShopDomain,
    api_key: ApiKey,
    api_password: ApiPassword,
    api_version: ApiVersion,
    api_host: Option<HostUrl>,
    metafield_namespace: String,
    user_agent_prefix: Option<String>,
}

impl ShopifyConfig {
    /// Creates a new builder for constructing a `ShopifyConfig`.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API password.
    #[must_use]
    pub const fn api_password(&self) -> &ApiPassword {
        &self.api_password
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the host override, if configured.
    ///
    /// When set, requests go to this host instead of the shop domain.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the namespace new metafields are created in.
    #[must_use]
    pub fn metafield_namespace(&self) -> &str {
        &self.metafield_namespace
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the scheme and host requests are sent to.
    #[must_use]
    pub fn base_uri(&self) -> String {
        self.api_host.as_ref().map_or_else(
            || format!("https://{}", self.shop.as_ref()),
            |host| host.as_ref().to_string(),
        )
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
    assert_send_sync::<EbayConfig>();
};

/// Builder for [`ShopifyConfig`].
///
/// `shop`, `api_key` and `api_password` are required.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::latest`]
/// - `api_host`: `None` (use the shop domain)
/// - `metafield_namespace`: `"global"`
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    shop: Option<ShopDomain>,
    api_key: Option<ApiKey>,
    api_password: Option<ApiPassword>,
    api_version: Option<ApiVersion>,
    api_host: Option<HostUrl>,
    metafield_namespace: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API password (required).
    #[must_use]
    pub fn api_password(mut self, password: ApiPassword) -> Self {
        self.api_password = Some(password);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Routes requests to `host` instead of the shop domain.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the namespace used when creating metafields.
    #[must_use]
    pub fn metafield_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metafield_namespace = Some(namespace.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ShopifyConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] when a required field is
    /// unset, or [`ConfigError::EmptyMetafieldNamespace`] for a blank
    /// namespace.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_password = self.api_password.ok_or(ConfigError::MissingRequiredField {
            field: "api_password",
        })?;

        let metafield_namespace = self
            .metafield_namespace
            .unwrap_or_else(|| DEFAULT_METAFIELD_NAMESPACE.to_string());
        if metafield_namespace.trim().is_empty() {
            return Err(ConfigError::EmptyMetafieldNamespace);
        }

        Ok(ShopifyConfig {
            shop,
            api_key,
            api_password,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            api_host: self.api_host,
            metafield_namespace,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

/// Configuration for the eBay adapter.
///
/// Credentials are not part of the config: bearer tokens come from a
/// [`TokenProvider`](crate::auth::TokenProvider) on every call.
#[derive(Clone, Debug)]
pub struct EbayConfig {
    api_url: HostUrl,
    marketplace_id: Option<String>,
    content_language: String,
    user_agent_prefix: Option<String>,
}

impl EbayConfig {
    /// Creates a new builder for constructing an `EbayConfig`.
    #[must_use]
    pub fn builder() -> EbayConfigBuilder {
        EbayConfigBuilder::new()
    }

    /// Returns the API root (e.g., `https://api.ebay.com`).
    #[must_use]
    pub const fn api_url(&self) -> &HostUrl {
        &self.api_url
    }

    /// Returns the `X-EBAY-C-MARKETPLACE-ID` value, if configured.
    #[must_use]
    pub fn marketplace_id(&self) -> Option<&str> {
        self.marketplace_id.as_deref()
    }

    /// Returns the `Content-Language` sent with writes.
    #[must_use]
    pub fn content_language(&self) -> &str {
        &self.content_language
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

/// Builder for [`EbayConfig`]. Every field is optional.
///
/// # Defaults
///
/// - `api_url`: [`EBAY_PRODUCTION_URL`]
/// - `content_language`: `en-US` (the inventory PUT endpoints require one)
#[derive(Debug, Default)]
pub struct EbayConfigBuilder {
    api_url: Option<HostUrl>,
    marketplace_id: Option<String>,
    content_language: Option<String>,
    user_agent_prefix: Option<String>,
}

impl EbayConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API root.
    #[must_use]
    pub fn api_url(mut self, url: HostUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Targets the eBay sandbox.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the sandbox URL is a valid constant.
    pub fn sandbox(self) -> Result<Self, ConfigError> {
        Ok(self.api_url(HostUrl::new(EBAY_SANDBOX_URL)?))
    }

    /// Sets the marketplace header (e.g., `EBAY_US`).
    #[must_use]
    pub fn marketplace_id(mut self, marketplace_id: impl Into<String>) -> Self {
        self.marketplace_id = Some(marketplace_id.into());
        self
    }

    /// Sets the `Content-Language` header sent with writes.
    #[must_use]
    pub fn content_language(mut self, language: impl Into<String>) -> Self {
        self.content_language = Some(language.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`EbayConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the default URL is somehow
    /// rejected.
    pub fn build(self) -> Result<EbayConfig, ConfigError> {
        let api_url = match self.api_url {
            Some(url) => url,
            None => HostUrl::new(EBAY_PRODUCTION_URL)?,
        };

        Ok(EbayConfig {
            api_url,
            marketplace_id: self.marketplace_id,
            content_language: self
                .content_language
                .unwrap_or_else(|| "en-US".to_string()),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
