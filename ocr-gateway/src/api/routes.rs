use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::timeout::{RequestBodyTimeoutLayer, ResponseBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;

    let router = Router::new()
        .route(
            "/ocr",
            post(handlers::ocr_image).layer(DefaultBodyLimit::max(server.max_upload_bytes())),
        )
        .route("/health", get(handlers::health_check));

    // The same timeout bounds reading the body, writing the response and the
    // request as a whole.
    let router = match server.timeout() {
        Some(timeout) => router
            .layer(ResponseBodyTimeoutLayer::new(timeout))
            .layer(RequestBodyTimeoutLayer::new(timeout))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            )),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
