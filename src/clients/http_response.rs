//! HTTP response types shared by both vendor adapters.

use std::collections::HashMap;

/// Rate limit information parsed from Shopify's
/// `X-Shopify-Shop-Api-Call-Limit` header ("X/Y").
///
/// ```rust
/// use shopify_ebay_sync::clients::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("39/40").unwrap();
/// assert!(limit.is_nearly_exhausted());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// The current number of requests made in this bucket.
    pub request_count: u32,
    /// The maximum number of requests allowed in this bucket.
    pub bucket_size: u32,
}

impl ApiCallLimit {
    /// Parses the rate limit header value.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (count, size) = header_value.trim().split_once('/')?;
        Some(Self {
            request_count: count.parse().ok()?,
            bucket_size: size.parse().ok()?,
        })
    }

    /// Returns `true` when at most one request remains in the bucket.
    #[must_use]
    pub const fn is_nearly_exhausted(&self) -> bool {
        self.request_count.saturating_add(1) >= self.bucket_size
    }
}

/// A reply from either vendor API.
///
/// The raw text is always kept. `body` holds the parsed JSON when the text
/// parses; an empty reply parses as an empty object. Callers decide what a
/// non-JSON body means.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-cased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw reply text.
    pub text: String,
    /// The parsed reply, or `None` when the text is not JSON.
    pub body: Option<serde_json::Value>,
}

impl HttpResponse {
    /// Creates a response, parsing `text` as JSON where possible.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, text: impl Into<String>) -> Self {
        let text = text.into();
        let body = if text.trim().is_empty() {
            Some(serde_json::json!({}))
        } else {
            serde_json::from_str(&text).ok()
        };

        Self {
            code,
            headers,
            text,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` for 204 No Content.
    #[must_use]
    pub const fn is_no_content(&self) -> bool {
        self.code == 204
    }

    /// Returns the first value of the named header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the request id header value, if present.
    ///
    /// Shopify sends `X-Request-Id`; eBay sends `X-EBAY-C-REQUEST-ID`.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
            .or_else(|| self.header("x-ebay-c-request-id"))
    }

    /// Returns Shopify's call-limit header, parsed.
    #[must_use]
    pub fn api_call_limit(&self) -> Option<ApiCallLimit> {
        self.header("x-shopify-shop-api-call-limit")
            .and_then(ApiCallLimit::parse)
    }

    /// Returns Shopify's deprecation notice, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }
}
