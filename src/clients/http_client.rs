//! Async HTTP client shared by the Shopify and eBay adapters.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client bound to one API root.
///
/// The client handles:
/// - URL construction from base URI, base path and request path
/// - Default headers (User-Agent, Accept, and any auth header the adapter adds)
/// - Reading the reply into an [`HttpResponse`] regardless of status
///
/// Non-2xx replies are returned as `Ok`; the adapters own classification.
/// There is no retry loop and no timeout beyond reqwest's defaults.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_ebay_sync::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new("https://api.ebay.com", "/sell/inventory/v1", None)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "inventory_item/SKU-1")
///     .header("Authorization", "Bearer ...")
///     .build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    base_path: String,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `base_uri` - Scheme and host, e.g. `https://glitchlab.myshopify.com`
    /// * `base_path` - Path prefix, e.g. `/admin/api/2026-07`
    /// * `user_agent_prefix` - Optional prefix for the User-Agent header
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be initialized.
    pub fn new(
        base_uri: impl Into<String>,
        base_path: impl Into<String>,
        user_agent_prefix: Option<&str>,
    ) -> Result<Self, HttpError> {
        let prefix = user_agent_prefix.map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{prefix}shopify-ebay-sync v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri: base_uri.into().trim_end_matches('/').to_string(),
            base_path: base_path.into().trim_end_matches('/').to_string(),
            default_headers,
        })
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL for a request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_uri,
            self.base_path,
            path.trim_start_matches('/')
        )
    }

    /// Sends a request and reads the full reply.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the request fails validation
    /// and [`HttpError::Network`] if no reply could be read.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        let mut headers = self.default_headers.clone();
        headers.extend(request.headers.iter().cloned());

        let mut builder = self.client.request(method, &url);
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(json) = &request.json {
            builder = builder
                .header("Content-Type", "application/json")
                .body(json.to_string());
        }

        tracing::debug!(method = %request.method, url = %url, "sending request");
        let res = builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let text = res.text().await?;
        let response = HttpResponse::new(code, res_headers, text);

        tracing::debug!(
            method = %request.method,
            url = %url,
            status = code,
            request_id = response.request_id().unwrap_or_default(),
            "received response"
        );

        Ok(response)
    }

    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
