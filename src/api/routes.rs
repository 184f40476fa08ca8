//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST /shorten`      - Create a short key for a URL
/// - `GET  /healthz`      - Store reachability
/// - `GET  /{short_url}`  - Permanent redirect to the original URL
///
/// `/healthz` is seven characters long, so it never shadows a generated key.
/// `GET /shorten` answers 405 from the POST route rather than 404; keys are
/// six characters, so no generated key can hit it.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/healthz", get(health_handler))
        .route("/{short_url}", get(redirect_handler))
}
