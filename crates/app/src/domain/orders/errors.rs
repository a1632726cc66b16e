//! Orders service errors.

use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order has no items")]
    NoItems,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("remote store error")]
    Remote(#[source] RemoteError),
}

impl From<RemoteError> for OrdersServiceError {
    fn from(error: RemoteError) -> Self {
        match error.code() {
            Some("23503") => Self::InvalidReference,
            Some("23514" | "22P02") => Self::InvalidData,
            Some("PGRST116") => Self::NotFound,
            _ => Self::Remote(error),
        }
    }
}
