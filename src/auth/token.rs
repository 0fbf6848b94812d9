//! Bearer tokens for the eBay Sell APIs.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::SyncError;

/// An eBay user access token and its expiry.
///
/// The `Debug` implementation masks the token value.
///
/// # Example
///
/// ```rust
/// use shopify_ebay_sync::auth::Token;
///
/// let token = Token::new("v^1.1#i^1#...");
/// assert!(!token.is_expired());
/// assert_eq!(token.authorization_header(), "Bearer v^1.1#i^1#...");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    /// The raw access token.
    pub access_token: String,
    /// When the token stops being accepted, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Token {
    /// Creates a token with no known expiry.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Creates a token that expires at `expires_at`.
    #[must_use]
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Returns `true` if the expiry is known and in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"*****")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Source of bearer tokens for the eBay adapter.
///
/// The OAuth authorization-code and refresh-token exchanges live outside this
/// crate; an implementation wraps whatever the host uses for them. The eBay
/// adapter calls [`get_token`](Self::get_token) once per request and never
/// refreshes on its own: a rejected token surfaces as
/// [`SyncError::AuthenticationFailure`].
pub trait TokenProvider: Send + Sync {
    /// Returns the token to use for the next request.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::AuthenticationFailure`] if no token is available.
    fn get_token(&self) -> Result<Token, SyncError>;

    /// Exchanges `token` for a fresh one.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::AuthenticationFailure`] if the exchange fails.
    fn refresh(&self, token: &Token) -> Result<Token, SyncError>;
}

/// A provider that always hands out the same token.
///
/// Suitable when the host has already completed the OAuth dance for the
/// current request.
#[derive(Clone, Debug)]
pub struct StaticTokenProvider {
    token: Token,
}

impl StaticTokenProvider {
    /// Wraps an existing token.
    #[must_use]
    pub const fn new(token: Token) -> Self {
        Self { token }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn get_token(&self) -> Result<Token, SyncError> {
        if self.token.access_token.is_empty() {
            return Err(SyncError::AuthenticationFailure {
                message: "no access token configured".to_string(),
            });
        }
        Ok(self.token.clone())
    }

    fn refresh(&self, _token: &Token) -> Result<Token, SyncError> {
        Err(SyncError::AuthenticationFailure {
            message: "a static token cannot be refreshed".to_string(),
        })
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Token>();
    assert_send_sync::<StaticTokenProvider>();
};
