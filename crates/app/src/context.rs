//! App Context

use std::{fmt, sync::Arc};

use jam3a::fixtures::{Fixture, FixtureError};
use jiff::Timestamp;
use thiserror::Error;
use tracing::info;

use crate::{
    api::{ApiClient, ApiError},
    cart::{CartStore, CartStoreError},
    config::client::ClientConfig,
    domain::{
        auth::{AuthService, HttpAuthService},
        content::{ContentService, HttpContentService},
        deals::{DealsService, FixtureDealsService, HttpDealsService},
        orders::{HttpOrdersService, OrdersService},
        products::{FixtureProductsService, HttpProductsService, ProductsService},
    },
    session::SessionStore,
    storage::{FileStorage, Storage},
};

/// Application start-up errors.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The HTTP client could not be built from the configuration.
    #[error("failed to build the HTTP client")]
    Api(#[source] ApiError),

    /// The bundled catalog for offline mode did not load.
    #[error("failed to load the bundled catalog")]
    Fixture(#[from] FixtureError),
}

/// Services and stores shared by every command.
#[derive(Clone)]
pub struct AppContext {
    /// Local key/value store.
    pub storage: Arc<dyn Storage>,

    /// Sole writer of the stored token and user.
    pub session: SessionStore,

    /// Deals.
    pub deals: Arc<dyn DealsService>,

    /// Product catalog.
    pub products: Arc<dyn ProductsService>,

    /// Storefront content blocks.
    pub content: Arc<dyn ContentService>,

    /// Accounts and seller applications.
    pub auth: Arc<dyn AuthService>,

    /// Orders.
    pub orders: Arc<dyn OrdersService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("storage", &self.storage)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from client settings.
    ///
    /// Offline, deals and products come from the bundled catalog; everything else still
    /// talks to the API.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built or the bundled catalog is
    /// malformed.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppInitError> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(config.storage_dir.clone()));

        Self::with_storage(config, storage)
    }

    /// Build application context over an existing store.
    ///
    /// # Errors
    ///
    /// See [`Self::from_config`].
    pub fn with_storage(
        config: &ClientConfig,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, AppInitError> {
        let session = SessionStore::new(Arc::clone(&storage));
        let api = Arc::new(ApiClient::new(config, session.clone()).map_err(AppInitError::Api)?);

        let (deals, products): (Arc<dyn DealsService>, Arc<dyn ProductsService>) =
            if config.offline {
                let fixture = Fixture::bundled(Timestamp::now())?;

                info!(
                    deals = fixture.deals().len(),
                    products = fixture.products().len(),
                    "serving the bundled catalog"
                );

                (
                    Arc::new(FixtureDealsService::new(&fixture)),
                    Arc::new(FixtureProductsService::new(&fixture)),
                )
            } else {
                (
                    Arc::new(HttpDealsService::new(Arc::clone(&api))),
                    Arc::new(HttpProductsService::new(
                        Arc::clone(&api),
                        Arc::clone(&storage),
                    )),
                )
            };

        Ok(Self {
            deals,
            products,
            content: Arc::new(HttpContentService::new(Arc::clone(&api), Arc::clone(&storage))),
            auth: Arc::new(HttpAuthService::new(Arc::clone(&api), session.clone())),
            orders: Arc::new(HttpOrdersService::new(api)),
            session,
            storage,
        })
    }

    /// Load the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] when storage cannot be read.
    pub fn cart(&self) -> Result<CartStore, CartStoreError> {
        CartStore::load(Arc::clone(&self.storage))
    }
}
