//! Wishlist service.

use async_trait::async_trait;
use lapak::products::ProductId;
use mockall::automock;

use crate::{
    auth::UserUuid,
    domain::wishlist::{
        errors::WishlistServiceError, records::WishlistRecord,
        repository::RemoteWishlistRepository,
    },
    remote::RemoteClient,
};

#[derive(Debug, Clone)]
pub struct RemoteWishlistService {
    repository: RemoteWishlistRepository,
}

impl RemoteWishlistService {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self {
            repository: RemoteWishlistRepository::new(client),
        }
    }
}

#[async_trait]
impl WishlistService for RemoteWishlistService {
    async fn list_wishlist(
        &self,
        user: UserUuid,
    ) -> Result<Vec<WishlistRecord>, WishlistServiceError> {
        Ok(self.repository.list(user).await?)
    }

    async fn add_to_wishlist(
        &self,
        user: UserUuid,
        product: &ProductId,
    ) -> Result<WishlistRecord, WishlistServiceError> {
        self.repository
            .add(user, product)
            .await?
            .ok_or(WishlistServiceError::InvalidReference)
    }

    async fn remove_from_wishlist(
        &self,
        user: UserUuid,
        product: &ProductId,
    ) -> Result<(), WishlistServiceError> {
        if self.repository.remove(user, product).await? == 0 {
            return Err(WishlistServiceError::NotFound);
        }

        Ok(())
    }

    async fn is_in_wishlist(
        &self,
        user: UserUuid,
        product: &ProductId,
    ) -> Result<bool, WishlistServiceError> {
        Ok(self.repository.contains(user, product).await?)
    }
}

#[automock]
#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Retrieves a user's wishlist with products, newest first.
    async fn list_wishlist(
        &self,
        user: UserUuid,
    ) -> Result<Vec<WishlistRecord>, WishlistServiceError>;

    /// Adds a product to a user's wishlist.
    async fn add_to_wishlist(
        &self,
        user: UserUuid,
        product: &ProductId,
    ) -> Result<WishlistRecord, WishlistServiceError>;

    /// Removes a product from a user's wishlist.
    async fn remove_from_wishlist(
        &self,
        user: UserUuid,
        product: &ProductId,
    ) -> Result<(), WishlistServiceError>;

    /// Whether a product is on a user's wishlist.
    async fn is_in_wishlist(
        &self,
        user: UserUuid,
        product: &ProductId,
    ) -> Result<bool, WishlistServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::helpers::client;

    use super::*;

    #[test]
    fn entries_are_scoped_to_user_and_product() -> TestResult {
        let user = UserUuid::new();
        let query = RemoteWishlistRepository::entry_query(user, &ProductId::new("joki-raid"));

        let url = client()?.rest_url("wishlist", &query)?;

        assert_eq!(
            url.query(),
            Some(format!("user_id=eq.{user}&product_id=eq.joki-raid").as_str())
        );

        Ok(())
    }

    #[test]
    fn duplicate_entries_map_to_already_exists() {
        let error = crate::remote::RemoteError::from_response(
            409,
            r#"{"code":"23505","message":"duplicate"}"#,
        );

        assert!(matches!(
            WishlistServiceError::from(error),
            WishlistServiceError::AlreadyExists
        ));
    }
}
