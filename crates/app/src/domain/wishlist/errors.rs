//! Wishlist service errors.

use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum WishlistServiceError {
    #[error("product already in wishlist")]
    AlreadyExists,

    #[error("product not in wishlist")]
    NotFound,

    #[error("product does not exist")]
    InvalidReference,

    #[error("remote store error")]
    Remote(#[source] RemoteError),
}

impl From<RemoteError> for WishlistServiceError {
    fn from(error: RemoteError) -> Self {
        match error.code() {
            Some("23505") => Self::AlreadyExists,
            Some("23503") => Self::InvalidReference,
            _ => Self::Remote(error),
        }
    }
}
