//! Handler for short URL redirects.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// Returns `301 Moved Permanently` with the stored URL in `Location`.
///
/// # Errors
///
/// Returns 404 if the alias does not exist or has expired.
/// Returns 500 if the store cannot be reached.
pub async fn resolve_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.resolver.resolve(&alias).await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response())
}
