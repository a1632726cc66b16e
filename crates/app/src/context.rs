//! App Context

use std::sync::Arc;

use crate::{
    auth::{AuthService, RemoteAuthService},
    checkout::CheckoutService,
    domain::{
        orders::{OrdersService, RemoteOrdersService},
        products::{ProductsService, RemoteProductsService},
        profiles::{ProfilesService, RemoteProfilesService},
        wishlist::{RemoteWishlistService, WishlistService},
    },
    remote::{RemoteClient, RemoteConfig},
};

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub wishlist: Arc<dyn WishlistService>,
    pub profiles: Arc<dyn ProfilesService>,
    pub auth: Arc<dyn AuthService>,
    pub checkout: CheckoutService,
    pub client: RemoteClient,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context around a single remote client, so every
    /// service shares the signed-in session.
    #[must_use]
    pub fn from_config(config: RemoteConfig) -> Self {
        let client = RemoteClient::new(config);
        let orders: Arc<dyn OrdersService> = Arc::new(RemoteOrdersService::new(client.clone()));

        Self {
            products: Arc::new(RemoteProductsService::new(client.clone())),
            wishlist: Arc::new(RemoteWishlistService::new(client.clone())),
            profiles: Arc::new(RemoteProfilesService::new(client.clone())),
            auth: Arc::new(RemoteAuthService::new(client.clone())),
            checkout: CheckoutService::new(Arc::clone(&orders)),
            orders,
            client,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::helpers::{client, session};

    use super::*;

    #[test]
    fn services_share_the_client_session() -> TestResult {
        let context = AppContext::from_config(client()?.config().clone());

        context.auth.restore_session(Some(session()));

        assert!(context.client.session().is_some());

        Ok(())
    }
}
