//! Profiles service errors.

use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum ProfilesServiceError {
    #[error("profile already exists")]
    AlreadyExists,

    #[error("profile not found")]
    NotFound,

    #[error("remote store error")]
    Remote(#[source] RemoteError),
}

impl From<RemoteError> for ProfilesServiceError {
    fn from(error: RemoteError) -> Self {
        match error.code() {
            Some("23505") => Self::AlreadyExists,
            Some("PGRST116") => Self::NotFound,
            _ => Self::Remote(error),
        }
    }
}
