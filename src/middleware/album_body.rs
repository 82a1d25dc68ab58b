use axum::{
    Json,
    extract::{FromRequest, Request},
    extract::rejection::JsonRejection,
};

use crate::error::AlbumError;
use crate::types::NewAlbum;

/// JSON body of `POST /albums`. Every rejection (missing content type,
/// malformed JSON, missing or mistyped fields) becomes a 400.
pub struct AlbumBody(pub NewAlbum);

impl<S> FromRequest<S> for AlbumBody
where
    S: Send + Sync,
{
    type Rejection = AlbumError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<NewAlbum>::from_request(req, state).await {
            Ok(Json(album)) => Ok(AlbumBody(album)),
            Err(rejection) => Err(invalid_body(rejection)),
        }
    }
}

fn invalid_body(rejection: JsonRejection) -> AlbumError {
    AlbumError::InvalidInput(rejection.body_text())
}
