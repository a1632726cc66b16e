//! Profiles service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::UserUuid,
    domain::profiles::{
        data::{NewProfile, ProfileUpdate},
        errors::ProfilesServiceError,
        records::ProfileRecord,
        repository::RemoteProfilesRepository,
    },
    remote::RemoteClient,
};

#[derive(Debug, Clone)]
pub struct RemoteProfilesService {
    repository: RemoteProfilesRepository,
}

impl RemoteProfilesService {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self {
            repository: RemoteProfilesRepository::new(client),
        }
    }
}

#[async_trait]
impl ProfilesService for RemoteProfilesService {
    async fn get_profile(
        &self,
        user: UserUuid,
    ) -> Result<Option<ProfileRecord>, ProfilesServiceError> {
        match self.repository.get(user).await {
            Ok(profile) => Ok(profile),
            Err(error) => match ProfilesServiceError::from(error) {
                ProfilesServiceError::NotFound => Ok(None),
                other => Err(other),
            },
        }
    }

    async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        self.repository
            .create(&profile)
            .await?
            .ok_or(ProfilesServiceError::NotFound)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        self.repository
            .update(user, &update)
            .await?
            .ok_or(ProfilesServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Retrieves a user's profile. A missing profile is `None`, not an error.
    async fn get_profile(
        &self,
        user: UserUuid,
    ) -> Result<Option<ProfileRecord>, ProfilesServiceError>;

    /// Creates a profile.
    async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Updates the set fields of a user's profile.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<ProfileRecord, ProfilesServiceError>;
}
