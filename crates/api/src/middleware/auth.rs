//! Principal extractor for Axum handlers.
//!
//! Authentication itself happens upstream (API gateway); this server
//! trusts the `x-principal-id` header the gateway injects. The extractor
//! exists so every handler records the submitting principal the same way
//! and requests without an identity are rejected uniformly.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use insights_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the gateway-authenticated principal identity.
pub const PRINCIPAL_HEADER: &str = "x-principal-id";

/// The authenticated principal on whose behalf a request runs.
///
/// Use this as an extractor parameter in any handler that requires an
/// identity:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Opaque principal identifier.
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(PRINCIPAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {PRINCIPAL_HEADER} header"
                )))
            })?;

        Ok(AuthUser {
            user_id: user_id.to_string(),
        })
    }
}
