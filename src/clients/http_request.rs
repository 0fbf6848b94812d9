//! Requests sent by the vendor adapters.
//!
//! Both vendor APIs speak JSON only, so a request body is always a
//! [`serde_json::Value`] and is always sent as `application/json`.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// Methods the Shopify and eBay endpoints in use accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read a resource.
    Get,
    /// Create a resource (Shopify metafields).
    Post,
    /// Replace or update a resource.
    Put,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }

    /// Returns `true` for methods that carry a body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request relative to an [`HttpClient`](crate::clients::HttpClient)'s
/// base path.
///
/// ```rust
/// use shopify_ebay_sync::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Put, "inventory_item/SKU-1")
///     .json(json!({"condition": "USED_EXCELLENT"}))
///     .header("Content-Language", "en-US")
///     .build()
///     .unwrap();
/// assert_eq!(request.path, "inventory_item/SKU-1");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// Method to send.
    pub method: HttpMethod,
    /// Path below the client's base path.
    pub path: String,
    /// JSON body for POST and PUT.
    pub json: Option<serde_json::Value>,
    /// Query pairs, in the order they were added.
    pub query: Vec<(String, String)>,
    /// Per-request headers. These override the client's defaults.
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Starts building a request.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder {
            request: Self {
                method,
                path: path.into(),
                json: None,
                query: Vec::new(),
                headers: Vec::new(),
            },
        }
    }

    /// Checks that the request can be sent.
    ///
    /// # Errors
    ///
    /// - [`InvalidHttpRequestError::EmptyPath`] when the path has no segments
    /// - [`InvalidHttpRequestError::MissingBody`] for a POST or PUT without a body
    /// - [`InvalidHttpRequestError::UnexpectedBody`] for a GET with a body
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        match (self.method.has_body(), self.json.is_some()) {
            (true, false) => Err(InvalidHttpRequestError::MissingBody {
                method: self.method,
                path: self.path.clone(),
            }),
            (false, true) => Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.method,
                path: self.path.clone(),
            }),
            _ => Ok(()),
        }
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    /// Sets the JSON body.
    #[must_use]
    pub fn json(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.request.json = Some(body.into());
        self
    }

    /// Appends a query pair.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    /// Finishes the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] when [`HttpRequest::verify`] fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}
