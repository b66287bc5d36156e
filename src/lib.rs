//! Crate entrypoint wiring together the DB, the provider client, and the API.

pub mod api;
pub mod db;
pub mod error;
pub mod provider;
pub mod validation;

use db::Db;
use provider::ZoneProvider;

use std::sync::Arc;

/// Complete application dependencies shared across handlers.
pub struct AppState {
    pub db: Db,
    pub provider: Arc<dyn ZoneProvider>,
}

/// Arc-wrapped version of `AppState` passed into Axum extensions.
pub type SharedState = Arc<AppState>;
