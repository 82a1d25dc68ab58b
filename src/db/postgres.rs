use crate::db::models::{DbAlbum, collect_albums, single_album};
use crate::db::schema::{POSTGRES_INIT, statements};
use crate::error::AlbumError;
use crate::service::store::AlbumStore;
use crate::types::{Album, NewAlbum};
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;

pub type PgPool = Pool<Postgres>;

const SELECT_ALL: &str = r#"
    SELECT CAST(id AS BIGINT) AS id, title, artist, CAST(price AS DOUBLE PRECISION) AS price
    FROM album ORDER BY id"#;
const SELECT_BY_ID: &str = r#"
    SELECT CAST(id AS BIGINT) AS id, title, artist, CAST(price AS DOUBLE PRECISION) AS price
    FROM album WHERE id = $1"#;
const INSERT: &str = r#"
    INSERT INTO album (title, artist, price) VALUES ($1, $2, $3)
    RETURNING CAST(id AS BIGINT)"#;

/// Album store over a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgAlbumModel {
    pool: PgPool,
}

impl PgAlbumModel {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn init_schema(&self) -> Result<(), AlbumError> {
        for stmt in statements(POSTGRES_INIT) {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(AlbumError::store("initialize album schema"))?;
        }
        Ok(())
    }
}

#[async_trait]
impl AlbumStore for PgAlbumModel {
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
    use sqlx::postgres::PgPoolOptions;

    /// Disposable database named by `ALBUMS_TEST_PG_URL`; run with `--ignored`.
    async fn model() -> PgAlbumModel {
        let url = std::env::var("ALBUMS_TEST_PG_URL").expect("ALBUMS_TEST_PG_URL is not set");
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&url)
            .await
            .expect("failed to connect to ALBUMS_TEST_PG_URL");
        let model = PgAlbumModel::new(pool);
        model.init_schema().await.expect("schema init failed");
        model
    }

    #[tokio::test]
    #[ignore = "needs ALBUMS_TEST_PG_URL"]
    async fn insert_then_read_back() {
        let model = model().await;
        let inserted = model
            .insert(NewAlbum {
                title: "Kind of Blue".into(),
                artist: "Miles Davis".into(),
                price: 29.99,
            })
            .await
            .unwrap();
        let id: i64 = inserted.id.parse().unwrap();

        let fetched = model.get_by_id(id).await.unwrap();
        assert_eq!(fetched, inserted);
        assert!(matches!(
            model.get_by_id(-1).await.unwrap_err(),
            AlbumError::NotFound { id: -1 }
        ));

        let all = model.get_all().await.unwrap();
        assert!(all.contains(&inserted));
        let ids: Vec<i64> = all.iter().map(|a| a.id.parse().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    #[ignore = "needs ALBUMS_TEST_PG_URL"]
    async fn numeric_price_tables_decode_through_casts() {
        let model = model().await;
        let mut tx = model.pool().begin().await.unwrap();
        sqlx::query(
            "CREATE TEMP TABLE album (id SERIAL, title TEXT, artist TEXT, price NUMERIC(5,2))",
        )
        .execute(&mut *tx)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO album (id, title, artist, price) \
             VALUES (7, 'Jeru', 'Gerry Mulligan', 17.99), (7, 'Dup', 'Dup', 1.00)",
        )
        .execute(&mut *tx)
        .await
        .unwrap();

        let rows = sqlx::query_as::<_, DbAlbum>(SELECT_ALL).fetch(&mut *tx);
        let albums = collect_albums(rows).await.unwrap();
        assert_eq!(albums.len(), 2);
        assert!(albums.iter().any(|a| a.id == "7" && a.price == 17.99));

        let rows = sqlx::query_as::<_, DbAlbum>(SELECT_BY_ID)
            .bind(7_i64)
            .fetch(&mut *tx);
        assert!(matches!(
            single_album(rows, 7).await.unwrap_err(),
            AlbumError::Consistency { id: 7 }
        ));
        tx.rollback().await.unwrap();
    }
}
