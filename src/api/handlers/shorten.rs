//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short key for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortURL": "aB3xZ9" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON, lacks `url`, or `url` is empty.
/// Returns 500 Internal Server Error if either store write fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.inspect_err(|e| tracing::info!("Invalid request: {}", e))?;
    payload.validate()?;

    let short_url = state.mapping_service.create_mapping(&payload.url).await?;

    Ok(Json(ShortenResponse { short_url }))
}
