//! Route definitions for the `/models` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::models;
use crate::state::AppState;

/// Routes mounted at `/models`.
///
/// ```text
/// GET    /        -> list_models
/// GET    /{id}    -> get_model
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(models::list_models))
        .route("/{id}", get(models::get_model))
}
