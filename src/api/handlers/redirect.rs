//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, info};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /{short_url}`
///
/// Only the cache is consulted; a key missing from the cache is reported as
/// not found even if the durable store has a record of it.
///
/// # Errors
///
/// Returns 404 Not Found if the key is unknown.
/// Returns 500 Internal Server Error if the cache lookup fails.
pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Some(original_url) = state.mapping_service.resolve_mapping(&short_url).await? else {
        info!("URL not found for short URL: {}", short_url);
        return Err(AppError::not_found(
            "URL not found",
            json!({ "short_url": short_url }),
        ));
    };

    let location = HeaderValue::try_from(original_url.as_str()).map_err(|e| {
        error!("Stored URL for {} is not a valid header value: {}", short_url, e);
        AppError::internal("Failed to get original URL", json!({}))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
