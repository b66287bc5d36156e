pub mod zones;

use crate::SharedState;
use axum::{Extension, Router, routing::get};

pub fn create_router(state: SharedState) -> Router {
    use crate::api::zones;

    Router::new()
        .route("/zones", get(zones::index).post(zones::create))
        .route("/zones/new", get(zones::new_zone))
        .route("/zones/{id}", get(zones::show).delete(zones::destroy))
        .route("/zones/{id}/edit", get(zones::edit))
        .layer(Extension(state))
}
