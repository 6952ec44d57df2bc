//! Handler for the link shortening endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{ConnectInfo, State},
    http::HeaderMap,
};
use std::net::SocketAddr;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_identity;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/v1`
///
/// The body is taken raw so the client's quota is checked before it is parsed;
/// any content type is accepted as long as the body is JSON.
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/page", "short": "promo", "expiry": 24 }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url": "http://example.com/page",
///   "short": "sho.rt/promo",
///   "expiry": 24,
///   "rate_limit": "9",
///   "rate_limit_reset": 30
/// }
/// ```
///
/// # Errors
///
/// - 400 body is not valid JSON
/// - 422 invalid URL
/// - 403 alias already in use
/// - 503 rate limit exceeded (with `rate_limit_reset`) or domain not allowed
/// - 500 store unreachable
pub async fn shorten_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ShortenResponse>, AppError> {
    let client_id = client_identity(&headers, addr, state.behind_proxy);

    let outcome = state
        .shortener
        .shorten(&client_id, || {
            serde_json::from_slice::<ShortenRequest>(&body)
                .map(Into::into)
                .map_err(|_| AppError::MalformedBody)
        })
        .await?;

    Ok(Json(outcome.into()))
}
