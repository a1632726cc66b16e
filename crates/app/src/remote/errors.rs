//! Remote store errors.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the hosted store.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// An HTTP transport or body decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request URL could not be built.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The store answered with a non-2xx status.
    #[error("request failed with status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,

        /// Store error code, e.g. `PGRST116`
        code: Option<String>,

        /// Human-readable message
        message: String,
    },

    /// The store answered 2xx with a body the caller cannot use.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl RemoteError {
    /// Whether repeating the request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteError::Http(error) => error.is_timeout() || error.is_connect(),
            RemoteError::Api { status, .. } => *status == 429 || *status >= 500,
            RemoteError::Url(_) | RemoteError::UnexpectedResponse(_) => false,
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Api { status, .. } => Some(*status),
            RemoteError::Http(error) => error.status().map(|status| status.as_u16()),
            RemoteError::Url(_) | RemoteError::UnexpectedResponse(_) => None,
        }
    }

    /// Store error code of an API error.
    pub fn code(&self) -> Option<&str> {
        match self {
            RemoteError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Build an API error from a status and raw response body.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();

        let (code, message) = match parsed {
            Some(parsed) => {
                let message = parsed
                    .message
                    .or(parsed.msg)
                    .or(parsed.error_description)
                    .unwrap_or_else(|| body.to_string());

                let code = parsed.code.map(|code| match code {
                    serde_json::Value::String(code) => code,
                    other => other.to_string(),
                });

                (code, message)
            }
            None => (None, body.to_string()),
        };

        RemoteError::Api {
            status,
            code,
            message,
        }
    }
}

/// Error body shapes of the table and auth APIs.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error_code")]
    code: Option<serde_json::Value>,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    msg: Option<String>,

    #[serde(default)]
    error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_errors_keep_their_code() {
        let error = RemoteError::from_response(
            406,
            r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#,
        );

        assert_eq!(error.code(), Some("PGRST116"));
        assert_eq!(error.status(), Some(406));
        assert!(!error.is_transient());
    }

    #[test]
    fn auth_errors_use_their_message_field() {
        let error = RemoteError::from_response(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );

        assert!(
            matches!(
                &error,
                RemoteError::Api { message, .. } if message == "Invalid login credentials"
            ),
            "expected auth message, got {error:?}"
        );
    }

    #[test]
    fn server_errors_are_transient() {
        assert!(RemoteError::from_response(503, "unavailable").is_transient());
        assert!(RemoteError::from_response(429, "").is_transient());
        assert!(!RemoteError::from_response(404, "").is_transient());
    }
}
