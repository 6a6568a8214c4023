//! Route table and request logging middleware.

use crate::handlers;
use crate::state::AppState;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use log::info;
use std::time::Instant;

/// Builds the application router over `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/test", get(handlers::greeting))
        .route(
            "/reviewers",
            get(handlers::list_reviewers).post(handlers::create_reviewer),
        )
        .route(
            "/reviewers/{id}",
            get(handlers::get_reviewer)
                .put(handlers::replace_reviewer)
                .patch(handlers::patch_reviewer)
                .delete(handlers::delete_reviewer),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=api method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
