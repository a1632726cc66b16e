//! Products service errors.

use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("remote store error")]
    Remote(#[source] RemoteError),
}

impl From<RemoteError> for ProductsServiceError {
    fn from(error: RemoteError) -> Self {
        // PostgreSQL error codes surfaced by the table API.
        match error.code() {
            Some("23505") => Self::AlreadyExists,
            Some("23502") => Self::MissingRequiredData,
            Some("23514" | "22P02") => Self::InvalidData,
            Some("PGRST116") => Self::NotFound,
            _ => Self::Remote(error),
        }
    }
}
