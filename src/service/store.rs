use crate::error::AlbumError;
use crate::types::{Album, NewAlbum};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// Persistence backend for albums, shared by every request handler.
#[async_trait]
pub trait AlbumStore: Send + Sync + 'static {
    /// All albums, ordered by id.
    async fn get_all(&self) -> Result<Vec<Album>, AlbumError>;

    /// Exactly one album, `NotFound` when absent, `Consistency` when the id is not unique.
    async fn get_by_id(&self, id: i64) -> Result<Album, AlbumError>;

    /// Persist a new album and return it with its store-assigned id.
    async fn insert(&self, album: NewAlbum) -> Result<Album, AlbumError>;
}

/// Run a store operation under a deadline. On expiry the operation future is
/// dropped, which aborts in-flight I/O and returns pooled connections.
pub async fn with_deadline<T, F>(
    op: &'static str,
    deadline: Duration,
    fut: F,
) -> Result<T, AlbumError>
where
    F: Future<Output = Result<T, AlbumError>>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| AlbumError::Timeout { op })?
}
