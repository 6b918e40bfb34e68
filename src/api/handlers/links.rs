//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, DeleteLinkResponse, LinkQuery};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "code": "promo24" }
/// ```
///
/// `code` is optional; without it a random 6-character code is generated.
///
/// # Errors
///
/// - 400 if the body is unreadable, the URL is malformed, or the code is not 6-8 alphanumerics
/// - 409 if the code is already taken
/// - 500 if no free code could be generated
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Link>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let custom_code = payload.custom_code().map(str::to_string);
    let link = state
        .link_service
        .create_link(payload.url, custom_code)
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

/// Lists every link, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Link>>, AppError> {
    Ok(Json(state.link_service.list_links().await?))
}

/// Returns one link.
///
/// # Endpoint
///
/// `GET /api/links/{code}?redirect=true`
///
/// With `redirect=true` a click is recorded first and the returned record
/// reflects the increment; otherwise the link is returned untouched.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    Query(query): Query<LinkQuery>,
    State(state): State<AppState>,
) -> Result<Json<Link>, AppError> {
    let link = if query.is_redirect() {
        state.link_service.record_click(&code).await?
    } else {
        state.link_service.get_link(&code).await?
    };

    Ok(Json(link))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteLinkResponse {
        message: "Link deleted successfully".to_string(),
    }))
}
