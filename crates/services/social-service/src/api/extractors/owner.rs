//! Acting-owner extractor for ownership-scoped post mutations.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use common::AppError;

use crate::config::OWNER_ID_HEADER;

/// User id taken from the `X-User-Id` header.
///
/// This is ownership by id match only. It identifies who is acting, it does
/// not authenticate them.
#[derive(Debug, Clone, Copy)]
pub struct OwnerId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(OWNER_ID_HEADER)
            .ok_or_else(|| AppError::validation("X-User-Id header is required"))?;

        header
            .to_str()
            .ok()
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .map(OwnerId)
            .ok_or_else(|| AppError::validation("X-User-Id must be a valid UUID"))
    }
}
