//! Transport-level error types.
//!
//! These cover failures before a reply exists: a request that fails
//! validation, or a network error. Replies with non-2xx statuses are not
//! errors at this layer; the adapters classify them into
//! [`SyncError`](crate::SyncError).

use thiserror::Error;

use crate::clients::http_request::HttpMethod;

/// A request that cannot be sent as built.
///
/// ```rust
/// use shopify_ebay_sync::clients::{HttpMethod, InvalidHttpRequestError};
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: HttpMethod::Put,
///     path: "inventory_item/A".to_string(),
/// };
/// assert_eq!(error.to_string(), "PUT inventory_item/A requires a JSON body");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// POST or PUT without a body.
    #[error("{method} {path} requires a JSON body")]
    MissingBody {
        /// The method used.
        method: HttpMethod,
        /// The request path.
        path: String,
    },

    /// GET with a body.
    #[error("{method} {path} cannot carry a body")]
    UnexpectedBody {
        /// The method used.
        method: HttpMethod,
        /// The request path.
        path: String,
    },

    /// The path has no segments.
    #[error("request path is empty")]
    EmptyPath,
}

/// Failure to obtain any reply.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request was rejected before sending.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Connection, TLS or body read failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_body_message() {
        let error = InvalidHttpRequestError::UnexpectedBody {
            method: HttpMethod::Get,
            path: "offer/1".to_string(),
        };
        assert_eq!(error.to_string(), "GET offer/1 cannot carry a body");
    }

    #[test]
    fn test_http_error_prefixes_invalid_request() {
        let error: HttpError = InvalidHttpRequestError::EmptyPath.into();
        assert_eq!(error.to_string(), "invalid request: request path is empty");
    }
}
