//! Acting-user extractor

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::ApiError;

/// Header carrying the id of the user performing the request.
pub const SHARER_USER_HEADER: &str = "x-sharer-user-id";

/// Id of the acting user, read from `X-Sharer-User-Id`.
#[derive(Debug, Clone, Copy)]
pub struct SharerUserId(pub i64);

impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SHARER_USER_HEADER)
            .ok_or_else(|| ApiError::BadRequest("Missing X-Sharer-User-Id header".into()))?;

        raw.to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(SharerUserId)
            .ok_or_else(|| ApiError::BadRequest("Invalid X-Sharer-User-Id header".into()))
    }
}
