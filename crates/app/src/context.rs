//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use dacha::{cart::CartStore, storage::FileStorage};

use crate::{
    api::{ApiError, StorefrontApi, StorefrontClient, parse_base_url},
    auth::AuthStore,
    checkout::CheckoutSubmitter,
    config::AppConfig,
    reservations::ReservationService,
    session::Session,
};

/// Errors raised while building the [`AppContext`].
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The API client could not be created.
    #[error("failed to create API client")]
    Api(#[source] ApiError),
}

/// Everything a storefront command needs.
pub struct AppContext {
    /// Backend API.
    pub api: Arc<dyn StorefrontApi>,

    /// Persisted cart.
    pub cart: CartStore<FileStorage>,

    /// Signed-in user.
    pub auth: AuthStore,

    /// Order submission.
    pub checkout: CheckoutSubmitter,

    /// Table reservations.
    pub reservations: ReservationService,

    /// API base URL, used to resolve image paths.
    pub api_url: String,

    session: Session,
    storage: FileStorage,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("api_url", &self.api_url)
            .field("cart", &self.cart)
            .field("auth", &self.auth)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build the context from configuration, restoring the cart and the session.
    ///
    /// # Errors
    ///
    /// Returns an error when the API base URL is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let origin = parse_base_url(&config.api.api_url).map_err(AppInitError::Api)?;
        let storage = FileStorage::new(&config.storage.data_dir);

        let session = Session::new(origin.clone());
        session.restore(&storage);

        let client = StorefrontClient::new(origin, session.jar()).map_err(AppInitError::Api)?;
        let api: Arc<dyn StorefrontApi> = Arc::new(client);

        debug!(
            api_url = %config.api.api_url,
            data_dir = %storage.dir().display(),
            "app context ready"
        );

        Ok(Self::with_api(
            api,
            config.api.api_url.trim_end_matches('/').to_string(),
            session,
            storage,
        ))
    }

    /// Build the context over an existing API.
    pub fn with_api(
        api: Arc<dyn StorefrontApi>,
        api_url: String,
        session: Session,
        storage: FileStorage,
    ) -> Self {
        Self {
            cart: CartStore::open(storage.clone()),
            auth: AuthStore::new(Arc::clone(&api)),
            checkout: CheckoutSubmitter::new(Arc::clone(&api)),
            reservations: ReservationService::new(Arc::clone(&api)),
            api,
            api_url,
            session,
            storage,
        }
    }

    /// Persist the session cookies for the next run. Failures are logged.
    pub fn save_session(&mut self) {
        if let Err(error) = self.session.save(&mut self.storage) {
            warn!("failed to persist session: {error}");
        }
    }
}
