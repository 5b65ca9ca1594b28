//! Provider-call error type and its mapping onto the application surface.

use thiserror::Error;

use tunehub_core::error::{AppError, ErrorKind};

/// Message attached to failures of ordinary provider calls.
pub const CALL_ERROR_MESSAGE: &str = "spotify client error";
/// Message attached to failures of the refresh grant.
pub const REFRESH_ERROR_MESSAGE: &str = "spotify client refresh token error";

/// A failed call to the provider.
///
/// `Api` means the provider answered with a non-success status and carries
/// whatever JSON body came back. `Transport` means no usable answer arrived
/// at all (connect failure, timeout, body decode failure).
#[derive(Debug, Clone, Error)]
pub enum SpotifyError {
    #[error("request to Spotify failed: {message}")]
    Transport { message: String },
    #[error("Spotify returned status {status}")]
    Api {
        status: u16,
        payload: serde_json::Value,
    },
}

impl SpotifyError {
    /// Whether the provider rejected the access token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// The `error` member of the provider's error body, when there is one.
    pub fn provider_error(&self) -> Option<serde_json::Value> {
        match self {
            Self::Api { payload, .. } => payload.get("error").cloned(),
            Self::Transport { .. } => None,
        }
    }

    /// Maps a failed provider call to the application error surface:
    /// an external-service error carrying the provider's own error payload.
    pub(crate) fn into_call_error(self) -> AppError {
        let details = self.provider_error();
        let err = AppError::with_source(ErrorKind::ExternalService, CALL_ERROR_MESSAGE, self);
        match details {
            Some(details) => err.with_details(details),
            None => err,
        }
    }

    /// Maps a failed refresh grant to the application error surface: an
    /// authentication error, since the session can no longer act for the user.
    pub(crate) fn into_refresh_error(self) -> AppError {
        let details = self.provider_error();
        let err = AppError::with_source(ErrorKind::Authentication, REFRESH_ERROR_MESSAGE, self);
        match details {
            Some(details) => err.with_details(details),
            None => err,
        }
    }
}

impl From<reqwest::Error> for SpotifyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_401_counts_as_unauthorized() {
        let unauthorized = SpotifyError::Api {
            status: 401,
            payload: json!({}),
        };
        let forbidden = SpotifyError::Api {
            status: 403,
            payload: json!({}),
        };
        let transport = SpotifyError::Transport {
            message: "connection reset".to_string(),
        };

        assert!(unauthorized.is_unauthorized());
        assert!(!forbidden.is_unauthorized());
        assert!(!transport.is_unauthorized());
    }

    #[test]
    fn test_call_error_carries_provider_payload() {
        let err = SpotifyError::Api {
            status: 404,
            payload: json!({"error": {"status": 404, "message": "Device not found"}}),
        };

        let app_err = err.into_call_error();

        assert_eq!(app_err.kind, ErrorKind::ExternalService);
        assert_eq!(app_err.message, CALL_ERROR_MESSAGE);
        assert_eq!(
            app_err.details,
            Some(json!({"status": 404, "message": "Device not found"}))
        );
    }

    #[test]
    fn test_refresh_error_is_authentication() {
        let err = SpotifyError::Api {
            status: 400,
            payload: json!({"error": "invalid_grant"}),
        };

        let app_err = err.into_refresh_error();

        assert_eq!(app_err.kind, ErrorKind::Authentication);
        assert_eq!(app_err.message, REFRESH_ERROR_MESSAGE);
        assert_eq!(app_err.details, Some(json!("invalid_grant")));
    }

    #[test]
    fn test_transport_error_has_no_details() {
        let err = SpotifyError::Transport {
            message: "timed out".to_string(),
        };

        assert!(err.into_call_error().details.is_none());
    }
}
