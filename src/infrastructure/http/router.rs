use crate::infrastructure::http::controllers::notifications;
use crate::infrastructure::http::middleware::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Upper bound on a single notification record once serialized.
const MAX_NOTIFICATION_BYTES: usize = 8 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_batch_size.saturating_mul(MAX_NOTIFICATION_BYTES);

    Router::new()
        .route("/health", get(notifications::health))
        .route(
            "/api/notifications/group",
            post(notifications::group_notifications),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
