use crate::db::models::{DbAlbum, collect_albums, single_album};
use crate::db::schema::{SQLITE_INIT, statements};
use crate::error::AlbumError;
use crate::service::store::AlbumStore;
use crate::types::{Album, NewAlbum};
use async_trait::async_trait;
use sqlx::{Pool, Sqlite};
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

const SELECT_ALL: &str = "SELECT id, title, artist, price FROM album ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, title, artist, price FROM album WHERE id = ?";
const INSERT: &str = "INSERT INTO album (title, artist, price) VALUES (?, ?, ?) RETURNING id";

#[derive(Clone)]
pub struct SqliteAlbumModel {
    pool: SqlitePool,
}

impl SqliteAlbumModel {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), AlbumError> {
        for stmt in statements(SQLITE_INIT) {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(AlbumError::store("initialize album schema"))?;
        }
        Ok(())
    }
}

#[async_trait]
impl AlbumStore for SqliteAlbumModel {
    async fn get_all(&self) -> Result<Vec<Album>, AlbumError> {
        collect_albums(sqlx::query_as::<_, DbAlbum>(SELECT_ALL).fetch(&self.pool)).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Album, AlbumError> {
        let rows = sqlx::query_as::<_, DbAlbum>(SELECT_BY_ID)
            .bind(id)
            .fetch(&self.pool);
        single_album(rows, id).await
    }

    async fn insert(&self, album: NewAlbum) -> Result<Album, AlbumError> {
        let (id,): (i64,) = sqlx::query_as(INSERT)
            .bind(album.title.as_str())
            .bind(album.artist.as_str())
            .bind(album.price)
            .fetch_one(&self.pool)
            .await
            .map_err(AlbumError::store("insert album"))?;
        debug!(id, "album inserted");
        Ok(album.into_album(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory database.
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn model() -> SqliteAlbumModel {
        let model = SqliteAlbumModel::new(memory_pool().await);
        model.init_schema().await.unwrap();
        model
    }

    fn kind_of_blue() -> NewAlbum {
        NewAlbum {
            title: "Kind of Blue".into(),
            artist: "Miles Davis".into(),
            price: 29.99,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_lists_in_id_order() {
        let model = model().await;
        let first = model.insert(kind_of_blue()).await.unwrap();
        let second = model
            .insert(NewAlbum {
                title: "Jeru".into(),
                artist: "Gerry Mulligan".into(),
                price: 17.99,
            })
            .await
            .unwrap();

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");

        let all = model.get_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn get_by_id_returns_row_or_not_found() {
        let model = model().await;
        let inserted = model.insert(kind_of_blue()).await.unwrap();

        let fetched = model.get_by_id(1).await.unwrap();
        assert_eq!(fetched, inserted);

        let missing = model.get_by_id(42).await.unwrap_err();
        assert!(matches!(missing, AlbumError::NotFound { id: 42 }));
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let model = model().await;
        model.init_schema().await.unwrap();
        assert!(model.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_ids_surface_as_consistency_error() {
        let model = SqliteAlbumModel::new(memory_pool().await);
        sqlx::query("CREATE TABLE album (id INTEGER, title TEXT, artist TEXT, price REAL)")
            .execute(model.pool())
            .await
            .unwrap();
        for _ in 0..2 {
            sqlx::query("INSERT INTO album VALUES (5, 'Dup', 'Dup', 1.0)")
                .execute(model.pool())
                .await
                .unwrap();
        }

        let err = model.get_by_id(5).await.unwrap_err();
        assert!(matches!(err, AlbumError::Consistency { id: 5 }));
    }

    #[tokio::test]
    async fn missing_table_is_wrapped_with_operation() {
        let model = SqliteAlbumModel::new(memory_pool().await);
        let err = model.get_all().await.unwrap_err();
        assert!(matches!(err, AlbumError::Store { op: "query albums", .. }));
    }
}
