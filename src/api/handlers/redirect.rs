//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject anything that is not shaped like a code (404, no store access)
/// 2. Atomically increment the click counter and read the target URL
/// 3. Return 302 Found with `Location` set to the target
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.record_click(&code).await?;

    let location = location_header(&link.url)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value, falling back to the URL's ASCII serialization
/// when the stored string contains characters a header cannot carry.
fn location_header(target: &str) -> Result<HeaderValue, AppError> {
    if target.is_ascii()
        && let Ok(value) = HeaderValue::from_str(target)
    {
        return Ok(value);
    }

    Url::parse(target)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::internal(
                "Stored URL cannot be used as a redirect target",
                json!({ "url": target }),
            )
        })
}
