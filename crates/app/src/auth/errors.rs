//! Auth service errors.

use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("not signed in")]
    NotSignedIn,

    #[error("unexpected auth response: {0}")]
    UnexpectedResponse(String),

    #[error("auth provider error")]
    Remote(#[source] RemoteError),
}

impl From<RemoteError> for AuthServiceError {
    fn from(error: RemoteError) -> Self {
        match error.status() {
            Some(401) => Self::NotSignedIn,
            _ => Self::Remote(error),
        }
    }
}
