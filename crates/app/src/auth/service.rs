//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use serde_json::{Value, json};
use tokio::sync::watch;
use tracing::info;

use crate::{
    auth::{AuthServiceError, AuthUser, Credentials, Session, SignUp, UserAttributes},
    remote::RemoteClient,
};

/// Role given to accounts created through sign-up.
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone)]
pub struct RemoteAuthService {
    client: RemoteClient,
}

impl RemoteAuthService {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for RemoteAuthService {
    async fn sign_in(&self, credentials: Credentials) -> Result<Session, AuthServiceError> {
        let session: Session = self
            .client
            .auth_json(
                Method::POST,
                "token",
                &[("grant_type", "password")],
                &credentials,
            )
            .await
            .map_err(|error| match error.status() {
                Some(400 | 401) => AuthServiceError::InvalidCredentials,
                _ => AuthServiceError::from(error),
            })?;

        info!(user = %session.user.id, "signed in");

        self.client.set_session(Some(session.clone()));

        Ok(session)
    }

    async fn sign_up(&self, sign_up: SignUp) -> Result<AuthUser, AuthServiceError> {
        let body = json!({
            "email": sign_up.credentials.email,
            "password": sign_up.credentials.password,
            "data": {
                "full_name": sign_up.full_name,
                "role": DEFAULT_ROLE,
            },
        });

        let response: Value = self
            .client
            .auth_json(Method::POST, "signup", &[], &body)
            .await?;

        // Without email confirmation the provider answers with a full session.
        if response.get("access_token").is_some() {
            let session: Session = serde_json::from_value(response)
                .map_err(|error| AuthServiceError::UnexpectedResponse(error.to_string()))?;
            let user = session.user.clone();

            self.client.set_session(Some(session));

            return Ok(user);
        }

        serde_json::from_value(response)
            .map_err(|error| AuthServiceError::UnexpectedResponse(error.to_string()))
    }

    async fn sign_out(&self) -> Result<(), AuthServiceError> {
        if self.client.session().is_none() {
            return Ok(());
        }

        let result = self.client.auth_empty(Method::POST, "logout").await;

        // The local session ends even if the provider already forgot it.
        self.client.set_session(None);

        match result {
            Ok(()) => Ok(()),
            Err(error) if error.status() == Some(401) => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    fn current_session(&self) -> Option<Session> {
        self.client.session()
    }

    fn restore_session(&self, session: Option<Session>) {
        self.client.set_session(session);
    }

    async fn update_user(&self, attributes: UserAttributes) -> Result<AuthUser, AuthServiceError> {
        if self.client.session().is_none() {
            return Err(AuthServiceError::NotSignedIn);
        }

        let user: AuthUser = self
            .client
            .auth_json(Method::PUT, "user", &[], &json!({ "data": attributes }))
            .await?;

        if let Some(mut session) = self.client.session() {
            session.user = user.clone();
            self.client.set_session(Some(session));
        }

        Ok(user)
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.client.subscribe()
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Signs in with email and password, making the session current.
    async fn sign_in(&self, credentials: Credentials) -> Result<Session, AuthServiceError>;

    /// Creates an account. Signs it in when the provider returns a session.
    async fn sign_up(&self, sign_up: SignUp) -> Result<AuthUser, AuthServiceError>;

    /// Ends the current session. Signing out while signed out is a no-op.
    async fn sign_out(&self) -> Result<(), AuthServiceError>;

    /// The current session, if any.
    fn current_session(&self) -> Option<Session>;

    /// Replaces the current session, e.g. with one saved by a previous run.
    fn restore_session(&self, session: Option<Session>);

    /// Updates the signed-in account's metadata.
    async fn update_user(&self, attributes: UserAttributes) -> Result<AuthUser, AuthServiceError>;

    /// Watches session changes.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}
