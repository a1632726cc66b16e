//! CLI Errors

use std::io;

use lapak::{
    checkout::CheckoutError, fixtures::FixtureError, pricing::PricingError, products::ProductId,
    storage::StorageError,
};
use lapak_app::{
    auth::AuthServiceError,
    checkout::CheckoutServiceError,
    domain::{
        orders::OrdersServiceError, products::ProductsServiceError,
        profiles::ProfilesServiceError, wishlist::WishlistServiceError,
    },
};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("no store configured; set LAPAK_STORE_URL and LAPAK_STORE_ANON_KEY")]
    RemoteNotConfigured,

    #[error("not signed in; run `lapak login` first")]
    NotSignedIn,

    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("{0} is not in the cart")]
    NotInCart(ProductId),

    #[error("failed to access local data")]
    Storage(#[from] StorageError),

    #[error("failed to load product catalog")]
    Fixture(#[from] FixtureError),

    #[error("saved session is unreadable")]
    Session(#[from] serde_json::Error),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Settlement(#[from] CheckoutServiceError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("product request failed")]
    Products(#[from] ProductsServiceError),

    #[error("order request failed")]
    Orders(#[from] OrdersServiceError),

    #[error("profile request failed")]
    Profiles(#[from] ProfilesServiceError),

    #[error("wishlist request failed")]
    Wishlist(#[from] WishlistServiceError),

    #[error(transparent)]
    Auth(#[from] AuthServiceError),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}
