//! Route definitions for the `/datasets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::datasets;
use crate::state::AppState;

/// Routes mounted at `/datasets`.
///
/// ```text
/// GET    /        -> list_datasets
/// POST   /        -> register_dataset
/// GET    /{id}    -> get_dataset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(datasets::list_datasets).post(datasets::register_dataset),
        )
        .route("/{id}", get(datasets::get_dataset))
}
