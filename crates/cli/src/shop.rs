//! Shop
//!
//! Everything a command works with: the catalog, the saved cart and, when a
//! store is configured, the remote services and signed-in session.

use std::sync::Arc;

use jiff::Timestamp;
use lapak::{
    cart::CartStore,
    checkout::CheckoutFlow,
    storage::{FileStore, KeyValueStore},
};
use lapak_app::{
    auth::Session,
    checkout::{Buyer, CheckoutService},
    context::AppContext,
};
use tracing::{info, warn};

use crate::{catalog::Catalog, config::CliConfig, errors::CliError};

/// Storage key of the signed-in session.
pub(crate) const SESSION_STORAGE_KEY: &str = "auth-session";

#[derive(Debug)]
pub(crate) struct Shop {
    pub(crate) catalog: Catalog,
    pub(crate) cart: CartStore<FileStore>,
    app: Option<AppContext>,
    sessions: FileStore,
    payment_payload: Option<String>,
}

impl Shop {
    /// Open the shop described by `config`, restoring any saved session.
    pub(crate) fn open(config: &CliConfig) -> Result<Self, CliError> {
        let storage = FileStore::open(config.storage.data_dir.clone())?;
        let app = config.store.remote().map(AppContext::from_config);

        let catalog = match &app {
            Some(app) => Catalog::Remote(Arc::clone(&app.products)),
            None => Catalog::offline(&config.catalog)?,
        };

        let shop = Self {
            catalog,
            cart: CartStore::open(storage.clone()),
            app,
            sessions: storage,
            payment_payload: config.payment.qris_payload.clone(),
        };

        shop.restore_session()?;

        Ok(shop)
    }

    /// Shop over an already loaded catalog, without a store.
    #[cfg(test)]
    pub(crate) fn offline(catalog: Catalog, storage: FileStore) -> Self {
        Self {
            catalog,
            cart: CartStore::open(storage.clone()),
            app: None,
            sessions: storage,
            payment_payload: None,
        }
    }

    /// Remote services, if a store is configured.
    pub(crate) fn app(&self) -> Result<&AppContext, CliError> {
        self.app.as_ref().ok_or(CliError::RemoteNotConfigured)
    }

    /// Remote services and the signed-in session.
    pub(crate) fn signed_in(&self) -> Result<(&AppContext, Session), CliError> {
        let app = self.app()?;
        let session = app.auth.current_session().ok_or(CliError::NotSignedIn)?;

        Ok((app, session))
    }

    /// Where a confirmed checkout is recorded: `None` when running offline.
    pub(crate) fn settlement(&self) -> Result<Option<(CheckoutService, Buyer)>, CliError> {
        if self.app.is_none() {
            return Ok(None);
        }

        let (app, session) = self.signed_in()?;

        Ok(Some((app.checkout.clone(), Buyer::from(&session))))
    }

    /// Fresh checkout flow using the configured payment code.
    pub(crate) fn checkout_flow(&self) -> CheckoutFlow {
        match &self.payment_payload {
            Some(payload) => CheckoutFlow::with_payment_payload(payload.clone()),
            None => CheckoutFlow::new(),
        }
    }

    /// Persist `session`, or forget the saved one.
    pub(crate) fn save_session(&mut self, session: Option<&Session>) -> Result<(), CliError> {
        match session {
            Some(session) => self
                .sessions
                .set(SESSION_STORAGE_KEY, &serde_json::to_string(session)?)?,
            None => self.sessions.remove(SESSION_STORAGE_KEY)?,
        }

        Ok(())
    }

    fn restore_session(&self) -> Result<(), CliError> {
        let Some(app) = &self.app else {
            return Ok(());
        };

        let Some(saved) = self.sessions.get(SESSION_STORAGE_KEY)? else {
            return Ok(());
        };

        let session: Session = serde_json::from_str(&saved)?;

        if session.is_expired(Timestamp::now()) {
            warn!("saved session expired, sign in again");
            return Ok(());
        }

        info!(user = %session.user.id, "session restored");

        app.auth.restore_session(Some(session));

        Ok(())
    }
}
