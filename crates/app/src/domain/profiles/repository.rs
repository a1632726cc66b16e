//! Profiles Repository

use crate::{
    auth::UserUuid,
    domain::profiles::{
        data::{NewProfile, ProfileUpdate},
        records::ProfileRecord,
    },
    remote::{Query, RemoteClient, RemoteError},
};

const TABLE: &str = "user_profiles";

#[derive(Debug, Clone)]
pub(crate) struct RemoteProfilesRepository {
    client: RemoteClient,
}

impl RemoteProfilesRepository {
    #[must_use]
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub(crate) async fn get(&self, user: UserUuid) -> Result<Option<ProfileRecord>, RemoteError> {
        let query = Query::new().select("*").eq("id", user).limit(1);
        let rows: Vec<ProfileRecord> = self.client.select(TABLE, &query).await?;

        Ok(rows.into_iter().next())
    }

    pub(crate) async fn create(
        &self,
        profile: &NewProfile,
    ) -> Result<Option<ProfileRecord>, RemoteError> {
        let rows: Vec<ProfileRecord> = self.client.insert(TABLE, profile).await?;

        Ok(rows.into_iter().next())
    }

    pub(crate) async fn update(
        &self,
        user: UserUuid,
        update: &ProfileUpdate,
    ) -> Result<Option<ProfileRecord>, RemoteError> {
        let rows: Vec<ProfileRecord> = self
            .client
            .update(TABLE, &Query::new().eq("id", user), update)
            .await?;

        Ok(rows.into_iter().next())
    }
}
