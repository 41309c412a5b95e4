//! Depot helper extensions.

use std::any::Any;

use reelbite_app::auth::Actor;
use salvo::prelude::Depot;

use crate::errors::ApiError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_actor(&mut self, actor: Actor);

    /// The authenticated account, or 401 when the auth middleware did not run.
    fn actor_or_401(&self) -> Result<Actor, ApiError>;

    /// The authenticated account when it is a food partner, otherwise 403.
    fn partner_or_403(&self) -> Result<Actor, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn insert_actor(&mut self, actor: Actor) {
        self.inject(actor);
    }

    fn actor_or_401(&self) -> Result<Actor, ApiError> {
        self.obtain::<Actor>()
            .copied()
            .map_err(|_ignored| ApiError::unauthorized("Unauthorized"))
    }

    fn partner_or_403(&self) -> Result<Actor, ApiError> {
        let actor = self.actor_or_401()?;

        if actor.is_partner() {
            Ok(actor)
        } else {
            Err(ApiError::forbidden("Food partner account required"))
        }
    }
}
