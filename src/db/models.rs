use crate::error::AlbumError;
use crate::types::Album;
use futures::TryStreamExt;
use futures::stream::BoxStream;
use sqlx::FromRow;

/// Row shape shared by both database backends.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbAlbum {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl From<DbAlbum> for Album {
    fn from(d: DbAlbum) -> Self {
        Album {
            id: d.id.to_string(),
            title: d.title,
            artist: d.artist,
            price: d.price,
        }
    }
}

/// Lazy row cursor as returned by `sqlx::QueryAs::fetch`.
pub type AlbumRows<'a> = BoxStream<'a, Result<DbAlbum, sqlx::Error>>;

/// Drain the cursor into albums.
pub async fn collect_albums(rows: AlbumRows<'_>) -> Result<Vec<Album>, AlbumError> {
    rows.map_ok(Album::from)
        .try_collect()
        .await
        .map_err(AlbumError::store("query albums"))
}

/// Expect exactly one row for `id`: none is `NotFound`, a second is `Consistency`.
/// The cursor is dropped after at most two rows.
pub async fn single_album(mut rows: AlbumRows<'_>, id: i64) -> Result<Album, AlbumError> {
    let Some(first) = rows
        .try_next()
        .await
        .map_err(AlbumError::store("query album"))?
    else {
        return Err(AlbumError::NotFound { id });
    };
    if rows
        .try_next()
        .await
        .map_err(AlbumError::store("query album"))?
        .is_some()
    {
        return Err(AlbumError::Consistency { id });
    }
    Ok(first.into())
}
