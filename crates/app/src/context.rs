//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        carts::{CartsService, PgCartsService},
        foods::{FoodsService, PgFoodsService},
        orders::{OrdersService, PgOrdersService},
    },
    media::{ImageKitClient, ImageKitConfig},
    payments::{StripeClient, StripeConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub foods: Arc<dyn FoodsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL and the external
    /// service configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        stripe: StripeConfig,
        imagekit: ImageKitConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        let gateway = Arc::new(StripeClient::new(stripe));
        let media = Arc::new(ImageKitClient::new(imagekit));

        Ok(Self {
            accounts: Arc::new(PgAccountsService::new(db.clone())),
            foods: Arc::new(PgFoodsService::new(db.clone(), media)),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db, gateway)),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
