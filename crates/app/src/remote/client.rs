//! HTTP client for the hosted store.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::watch;
use tracing::{debug, error};
use url::Url;

use crate::{
    auth::Session,
    remote::{Query, RemoteConfig, RemoteError},
};

/// HTTP client for the table and auth APIs.
///
/// Requests carry the anon key, and the signed-in user's access token when
/// there is a session.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    config: RemoteConfig,
    http: Client,
    session: Arc<watch::Sender<Option<Session>>>,
}

impl RemoteClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            config,
            http: Client::new(),
            session: Arc::new(watch::Sender::new(None)),
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Current session.
    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    /// Replace the current session, notifying subscribers.
    pub fn set_session(&self, session: Option<Session>) {
        self.session.send_replace(session);
    }

    /// Watch session changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    /// URL of a table request.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL cannot be joined.
    pub fn rest_url(&self, table: &str, query: &Query) -> Result<Url, RemoteError> {
        let mut url = self.config.url.join(&format!("rest/v1/{table}"))?;
        let pairs = query.pairs();

        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }

    /// URL of an auth request.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL cannot be joined.
    pub fn auth_url(&self, path: &str) -> Result<Url, RemoteError> {
        Ok(self.config.url.join(&format!("auth/v1/{path}"))?)
    }

    /// Fetch rows, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, RemoteError> {
        let url = self.rest_url(table, query)?;

        self.config
            .retry
            .run(table, || {
                let url = url.clone();

                async move { self.send_json(self.request(Method::GET, url)).await }
            })
            .await
    }

    /// Insert rows, returning them as stored.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn insert<B: Serialize + ?Sized + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<Vec<T>, RemoteError> {
        let url = self.rest_url(table, &Query::new())?;

        self.send_json(self.write(Method::POST, url).json(body)).await
    }

    /// Update matching rows, returning them as stored.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn update<B: Serialize + ?Sized + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        body: &B,
    ) -> Result<Vec<T>, RemoteError> {
        let url = self.rest_url(table, query)?;

        self.send_json(self.write(Method::PATCH, url).json(body)).await
    }

    /// Delete matching rows, returning them.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, RemoteError> {
        let url = self.rest_url(table, query)?;

        self.send_json(self.write(Method::DELETE, url)).await
    }

    /// Call an auth endpoint with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn auth_json<B: Serialize + ?Sized + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: &B,
    ) -> Result<T, RemoteError> {
        let mut url = self.auth_url(path)?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        self.send_json(self.request(method, url).json(body)).await
    }

    /// Call an auth endpoint, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure.
    pub async fn auth_empty(&self, method: Method, path: &str) -> Result<(), RemoteError> {
        let url = self.auth_url(path)?;

        self.send(self.request(method, url)).await?;

        Ok(())
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, path = url.path(), "remote request");

        let token = self
            .session
            .borrow()
            .as_ref()
            .map_or_else(|| self.config.anon_key.clone(), |session| session.access_token.clone());

        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    fn write(&self, method: Method, url: Url) -> RequestBuilder {
        self.request(method, url)
            .header("Prefer", "return=representation")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let error = RemoteError::from_response(status.as_u16(), &text);

            error!(%error, "remote request failed");

            return Err(error);
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = self.send(request).await?;

        Ok(response.json().await?)
    }
}
