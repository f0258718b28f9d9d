//! Axum router construction.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState, request_timeout: Duration) -> Router {
    let routes = Router::new()
        .route("/records", post(handlers::create_record))
        .route("/records/:id", get(handlers::get_record))
        .route("/records/:id/decrypt", post(handlers::decrypt_stored))
        .route("/decrypt", post(handlers::decrypt_record))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found);

    middleware::apply(routes, request_timeout).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::middleware::DEFAULT_REQUEST_TIMEOUT;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = build(AppState::default(), DEFAULT_REQUEST_TIMEOUT);
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn health_route_exists() {
        let app = build(AppState::default(), DEFAULT_REQUEST_TIMEOUT);
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
    }
}
