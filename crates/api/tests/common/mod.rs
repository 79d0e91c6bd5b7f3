//! Shared helpers for API integration tests.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use insights_api::config::ServerConfig;
use insights_api::engine::{JobDispatcher, StatusReconciler};
use insights_api::routes;
use insights_api::state::AppState;
use insights_core::artifacts::{ArtifactStore, LocalArtifactStore};
use insights_core::types::EntityId;
use insights_executor::ExecutorApi;

/// Principal used by most tests.
pub const PRINCIPAL: &str = "user-1";

/// Build a test `ServerConfig` rooted at the given artifact directory.
///
/// The executor URL points at a closed local port, so every hand-off
/// attempt fails immediately with a connection error: tests exercise
/// the delivery-warning path without a live executor.
pub fn test_config(artifact_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        executor_url: "http://127.0.0.1:9".to_string(),
        dispatch_timeout_secs: 1,
        callback_base_url: "http://127.0.0.1:3000".to_string(),
        artifact_dir: artifact_dir.display().to_string(),
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool and artifact directory.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub fn build_test_app(pool: PgPool, artifact_dir: &Path) -> Router {
    let config = test_config(artifact_dir);

    let artifact_store: Arc<dyn ArtifactStore> = Arc::new(LocalArtifactStore::new(artifact_dir));
    let executor = Arc::new(ExecutorApi::new(
        config.executor_url.clone(),
        Duration::from_secs(config.dispatch_timeout_secs),
    ));
    let dispatcher = Arc::new(JobDispatcher::new(
        pool.clone(),
        Arc::clone(&executor),
        config.callback_base_url.clone(),
    ));
    let reconciler = Arc::new(StatusReconciler::new(pool.clone(), artifact_store.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config),
        artifact_store,
        dispatcher,
        reconciler,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request with no principal header.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a GET request as `principal`.
pub async fn get_as(app: Router, uri: &str, principal: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("x-principal-id", principal)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body as `principal`.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    principal: &str,
    body: serde_json::Value,
) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header("x-principal-id", principal)
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body and no principal header
/// (the executor callback channel carries no user identity).
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Register the standard test dataset (columns: age, income, label) and
/// return its id.
pub async fn seed_dataset(app: &Router) -> EntityId {
    let response = post_json_as(
        app.clone(),
        "/api/v1/datasets",
        PRINCIPAL,
        serde_json::json!({
            "name": "churn",
            "storage_path": "datasets/churn.csv",
            "row_count": 1000,
            "columns": [
                { "name": "age", "data_type": "float" },
                { "name": "income", "data_type": "float" },
                { "name": "label", "data_type": "string" },
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().parse().unwrap()
}

/// Submit a valid classification job against `dataset_id` and return
/// the job id. The hand-off fails (no executor in tests), which leaves
/// the job pending: exactly what update tests need.
pub async fn submit_test_job(app: &Router, dataset_id: EntityId) -> EntityId {
    let response = post_json_as(
        app.clone(),
        "/api/v1/jobs",
        PRINCIPAL,
        serde_json::json!({
            "dataset_id": dataset_id,
            "target_column": "label",
            "algorithm": "random_forest",
            "problem_type": "classification",
            "hyperparameters": { "n_estimators": 100 },
            "split_ratio": 0.8,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    json["data"]["job"]["id"].as_str().unwrap().parse().unwrap()
}
