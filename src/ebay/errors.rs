//! Classification of eBay error envelopes.
//!
//! eBay reports failures as
//! `{"errors": [{"errorId": 25702, "message": "..."}, ...]}`. A fixed table
//! maps the ids this crate understands onto [`Outcome`] kinds; everything
//! else is an unexpected remote error carrying the whole reply.
//!
//! | errorId | Outcome |
//! |---|---|
//! | 25702 `SKU_NOT_FOUND` | `ItemNotFound` |
//! | 25710 `ENTITY_NOT_FOUND` | `ItemNotFound` |
//! | 1001 `INVALID_ACCESS_TOKEN` | `AuthenticationFailure` |
//! | 1002 `MISSING_ACCESS_TOKEN` | `AuthenticationFailure` |
//! | 1100 `ACCESS_DENIED` | `AuthenticationFailure` |
//! | anything else | `UnexpectedRemoteError` |

use serde_json::Value;

use crate::document::DocumentExt;
use crate::error::SyncError;

/// The SKU has no inventory item.
pub const SKU_NOT_FOUND: i64 = 25702;
/// The requested entity (offer, group) does not exist.
pub const ENTITY_NOT_FOUND: i64 = 25710;
/// The bearer token was rejected.
pub const INVALID_ACCESS_TOKEN: i64 = 1001;
/// No bearer token was sent.
pub const MISSING_ACCESS_TOKEN: i64 = 1002;
/// The token lacks the scope for this call.
pub const ACCESS_DENIED: i64 = 1100;

/// Result of classifying an eBay reply.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// No error envelope.
    Ok,
    /// Credentials were rejected, missing or insufficient.
    AuthenticationFailure(String),
    /// The resource does not exist.
    ItemNotFound(String),
    /// An error id outside the known table; carries the raw reply.
    UnexpectedRemoteError(Value),
}

impl Outcome {
    /// Converts the outcome into a `Result`, attaching the reply's status to
    /// unexpected errors.
    ///
    /// # Errors
    ///
    /// Every variant except [`Outcome::Ok`] becomes the matching
    /// [`SyncError`].
    pub fn into_result(self, status: u16) -> Result<(), SyncError> {
        match self {
            Self::Ok => Ok(()),
            Self::AuthenticationFailure(message) => Err(SyncError::AuthenticationFailure { message }),
            Self::ItemNotFound(message) => Err(SyncError::ItemNotFound { message }),
            Self::UnexpectedRemoteError(raw) => Err(SyncError::UnexpectedRemoteError { status, raw }),
        }
    }

    /// Returns `true` for [`Outcome::Ok`].
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Classifies a parsed eBay reply body.
///
/// The first entry in `errors` decides the outcome. Later entries are still
/// walked so they show up in the logs, but never change the result. An
/// `errors` list that is empty, or whose first entry has no `errorId`, is an
/// unexpected remote error.
///
/// ```rust
/// use shopify_ebay_sync::ebay::{classify_ebay_error, Outcome};
/// use serde_json::json;
///
/// let reply = json!({"errors": [{"errorId": 25702, "message": "SKU X was not found"}]});
/// assert_eq!(
///     classify_ebay_error(&reply),
///     Outcome::ItemNotFound("SKU X was not found".to_string())
/// );
/// assert_eq!(classify_ebay_error(&json!({})), Outcome::Ok);
/// ```
#[must_use]
pub fn classify_ebay_error(reply: &Value) -> Outcome {
    let errors = match reply.get("errors") {
        None | Some(Value::Null) => return Outcome::Ok,
        Some(Value::Array(errors)) => errors,
        Some(_) => {
            tracing::warn!(raw = %reply, "eBay error envelope is not a list");
            return Outcome::UnexpectedRemoteError(reply.clone());
        }
    };

    let mut outcome = None;
    for entry in errors {
        let error_id = entry.get("errorId").and_then(Value::as_i64);
        let message = entry.str_field("message").unwrap_or_default().to_string();

        let kind = match error_id {
            Some(SKU_NOT_FOUND | ENTITY_NOT_FOUND) => Outcome::ItemNotFound(message),
            Some(INVALID_ACCESS_TOKEN | MISSING_ACCESS_TOKEN | ACCESS_DENIED) => {
                Outcome::AuthenticationFailure(message)
            }
            _ => {
                tracing::warn!(error_id = ?error_id, raw = %reply, "unrecognised eBay error");
                Outcome::UnexpectedRemoteError(reply.clone())
            }
        };

        if outcome.is_none() {
            outcome = Some(kind);
        } else {
            tracing::debug!(error_id = ?error_id, "additional eBay error in reply: {:?}", kind);
        }
    }

    outcome.unwrap_or_else(|| {
        tracing::warn!(raw = %reply, "eBay reply has an empty error list");
        Outcome::UnexpectedRemoteError(reply.clone())
    })
}

/// Classifies an eBay reply with its status code.
///
/// 204 No Content is always [`Outcome::Ok`], whatever the body holds.
#[must_use]
pub fn classify_ebay_response(status: u16, reply: &Value) -> Outcome {
    if status == 204 {
        return Outcome::Ok;
    }
    classify_ebay_error(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(error_id: i64) -> Value {
        json!({"errors": [{"errorId": error_id, "domain": "API_INVENTORY", "message": "m"}]})
    }

    #[test]
    fn test_known_not_found_codes() {
        for id in [SKU_NOT_FOUND, ENTITY_NOT_FOUND] {
            assert_eq!(
                classify_ebay_error(&envelope(id)),
                Outcome::ItemNotFound("m".to_string())
            );
        }
    }

    #[test]
    fn test_known_auth_codes() {
        for id in [INVALID_ACCESS_TOKEN, MISSING_ACCESS_TOKEN, ACCESS_DENIED] {
            assert_eq!(
                classify_ebay_error(&envelope(id)),
                Outcome::AuthenticationFailure("m".to_string())
            );
        }
    }

    #[test]
    fn test_unknown_code_carries_raw_reply() {
        let reply = envelope(25001);
        assert_eq!(
            classify_ebay_error(&reply),
            Outcome::UnexpectedRemoteError(reply.clone())
        );
    }

    #[test]
    fn test_no_errors_key_is_ok() {
        assert!(classify_ebay_error(&json!({})).is_ok());
        assert!(classify_ebay_error(&json!({"sku": "A", "warnings": []})).is_ok());
    }

    #[test]
    fn test_first_error_wins() {
        let reply = json!({"errors": [
            {"errorId": INVALID_ACCESS_TOKEN, "message": "first"},
            {"errorId": SKU_NOT_FOUND, "message": "second"}
        ]});
        assert_eq!(
            classify_ebay_error(&reply),
            Outcome::AuthenticationFailure("first".to_string())
        );
    }

    #[test]
    fn test_unknown_first_error_shadows_known_later_error() {
        let reply = json!({"errors": [
            {"errorId": 25002, "message": "system error"},
            {"errorId": SKU_NOT_FOUND, "message": "not found"}
        ]});
        assert!(matches!(
            classify_ebay_error(&reply),
            Outcome::UnexpectedRemoteError(_)
        ));
    }

    #[test]
    fn test_empty_error_list_is_unexpected() {
        let reply = json!({"errors": []});
        assert_eq!(
            classify_ebay_error(&reply),
            Outcome::UnexpectedRemoteError(reply.clone())
        );
    }

    #[test]
    fn test_no_content_is_always_ok() {
        assert!(classify_ebay_response(204, &envelope(SKU_NOT_FOUND)).is_ok());
        assert_eq!(
            classify_ebay_response(404, &envelope(SKU_NOT_FOUND)),
            Outcome::ItemNotFound("m".to_string())
        );
    }

    #[test]
    fn test_into_result_maps_to_sync_error() {
        assert!(Outcome::Ok.into_result(200).is_ok());
        assert!(Outcome::ItemNotFound("m".into())
            .into_result(404)
            .unwrap_err()
            .is_not_found());

        let raw = json!({"errors": [{"errorId": 2004}]});
        match Outcome::UnexpectedRemoteError(raw.clone()).into_result(500) {
            Err(SyncError::UnexpectedRemoteError { status, raw: carried }) => {
                assert_eq!(status, 500);
                assert_eq!(carried, raw);
            }
            other => panic!("expected unexpected remote error, got {other:?}"),
        }
    }
}
