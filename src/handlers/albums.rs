use axum::{Json, extract::State, http::StatusCode};

use crate::AlbumError;
use crate::middleware::{AlbumBody, AlbumId};
use crate::router::AlbumsState;
use crate::service::with_deadline;
use crate::types::Album;

/// GET /albums -> every album as a JSON array.
pub async fn get_albums(State(state): State<AlbumsState>) -> Result<Json<Vec<Album>>, AlbumError> {
    let albums = with_deadline("query albums", state.timeout, state.albums.get_all()).await?;
    Ok(Json(albums))
}

/// GET /albums/{id} -> the album whose id matches, 400 for a non-numeric id.
pub async fn get_album_by_id(
    State(state): State<AlbumsState>,
    AlbumId(id): AlbumId,
) -> Result<Json<Album>, AlbumError> {
    let album = with_deadline("query album", state.timeout, state.albums.get_by_id(id)).await?;
    Ok(Json(album))
}

/// POST /albums -> stores the album and answers 201 with the persisted record.
pub async fn post_albums(
    State(state): State<AlbumsState>,
    AlbumBody(new): AlbumBody,
) -> Result<(StatusCode, Json<Album>), AlbumError> {
    let album = with_deadline("insert album", state.timeout, state.albums.insert(new)).await?;
    Ok((StatusCode::CREATED, Json(album)))
}
