//! Route table and response middleware.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, post};

use crate::handlers;
use crate::session::session_middleware;
use crate::state::AppState;

/// Largest accepted request body (uploads are buffered in memory).
const UPLOAD_LIMIT: usize = 256 * 1024 * 1024;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/navigate", post(handlers::navigate))
        .route("/upload", post(handlers::upload))
        .route("/create_folder", post(handlers::create_folder))
        .route("/delete", post(handlers::delete))
        .route("/rename", post(handlers::rename))
        .route("/download/{*path}", get(handlers::download))
        .route("/search", get(handlers::search))
        .route("/copy", post(handlers::copy))
        .route("/cut", post(handlers::cut))
        .route("/paste", post(handlers::paste))
        .route("/health", get(handlers::health))
        .route("/api/status", get(handlers::api_status))
        .route("/api/list", get(handlers::api_list))
        .route("/api/properties", get(handlers::api_properties))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(middleware::map_response(no_cache))
        .with_state(state)
}

/// Disable client caching on every response.
async fn no_cache(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    response
}
