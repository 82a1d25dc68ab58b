use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AlbumError;

/// Numeric `{id}` path segment. Undecodable segments and non-integer ids are
/// both rejected as `AlbumError`, so the 400 carries the usual JSON body.
#[derive(Debug, Clone, Copy)]
pub struct AlbumId(pub i64);

impl<S> FromRequestParts<S> for AlbumId
where
    S: Send + Sync,
{
    type Rejection = AlbumError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AlbumError::MalformedId(rejection.body_text()))?;
        let id = raw
            .parse::<i64>()
            .map_err(|source| AlbumError::InvalidId { raw, source })?;
        Ok(AlbumId(id))
    }
}
