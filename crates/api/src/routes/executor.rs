//! Route definitions for the executor callback channel.

use axum::routing::post;
use axum::Router;

use crate::handlers::executor_updates;
use crate::state::AppState;

/// Routes mounted at `/executor`.
///
/// ```text
/// POST   /updates    -> apply_update (executor result callback)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/updates", post(executor_updates::apply_update))
}
