//! HTTP transport shared by the vendor adapters.
//!
//! - [`HttpClient`]: async client bound to one API root
//! - [`HttpRequest`] / [`HttpRequestBuilder`]: validated requests
//! - [`HttpResponse`]: status, headers, raw text and parsed JSON
//! - [`HttpError`]: validation and network failures
//!
//! The transport never interprets status codes. Shopify replies are
//! classified in [`crate::shopify`], eBay replies in [`crate::ebay`].

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiCallLimit, HttpResponse};
