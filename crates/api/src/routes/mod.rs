pub mod datasets;
pub mod executor;
pub mod health;
pub mod jobs;
pub mod models;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /datasets                        list, register
/// /datasets/{id}                   get (with column schema)
///
/// /jobs                            list, submit
/// /jobs/{id}                       get
/// /jobs/{id}/status                polling snapshot
/// /jobs/{id}/redispatch            re-send to executor (POST)
///
/// /models                          list
/// /models/{id}                     get (metrics, feature importance)
///
/// /executor/updates                inbound executor callback (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/datasets", datasets::router())
        .nest("/jobs", jobs::router())
        .nest("/models", models::router())
        .nest("/executor", executor::router())
}
