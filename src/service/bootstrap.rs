use crate::config::{Config, StoreKind};
use crate::db::{PgAlbumModel, SqliteAlbumModel};
use crate::error::AlbumError;
use crate::service::memory_actor;
use crate::service::store::AlbumStore;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Open pools are kept so shutdown can close them after the server drains.
pub enum StorePool {
    None,
    Sqlite(crate::db::SqlitePool),
    Postgres(crate::db::PgPool),
}

impl StorePool {
    pub async fn close(&self) {
        match self {
            StorePool::None => {}
            StorePool::Sqlite(pool) => pool.close().await,
            StorePool::Postgres(pool) => pool.close().await,
        }
    }
}

/// Build the store selected by `cfg.store`. Any failure here is fatal to startup.
pub async fn build_store(cfg: &Config) -> Result<(Arc<dyn AlbumStore>, StorePool), AlbumError> {
    match cfg.store {
        StoreKind::Memory => {
            let store = memory_actor::spawn(memory_actor::seed_albums()).await?;
            Ok((Arc::new(store), StorePool::None))
        }
        StoreKind::Sqlite => {
            let connect_opts = SqliteConnectOptions::from_str(cfg.sqlite_url())
                .map_err(AlbumError::store("parse sqlite url"))?
                .create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(cfg.max_connections)
                .acquire_timeout(cfg.connect_timeout())
                .connect_with(connect_opts)
                .await
                .map_err(AlbumError::store("connect to sqlite"))?;
            let model = SqliteAlbumModel::new(pool.clone());
            model.init_schema().await?;
            info!(url = %cfg.sqlite_url(), "connected to sqlite");
            Ok((Arc::new(model), StorePool::Sqlite(pool)))
        }
        StoreKind::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(cfg.max_connections)
                .acquire_timeout(cfg.connect_timeout())
                .connect_with(pg_connect_options(cfg)?)
                .await
                .map_err(AlbumError::store("connect to postgres"))?;
            let model = PgAlbumModel::new(pool.clone());
            model.init_schema().await?;
            info!(host = %cfg.db_host, database = %cfg.db_name, "connected to postgres");
            Ok((Arc::new(model), StorePool::Postgres(pool)))
        }
    }
}

/// Connection options from `database_url`, or from the individual `db_*` fields.
pub fn pg_connect_options(cfg: &Config) -> Result<PgConnectOptions, AlbumError> {
    if let Some(url) = cfg.database_url.as_deref() {
        return PgConnectOptions::from_str(url).map_err(AlbumError::store("parse postgres url"));
    }
    Ok(PgConnectOptions::new()
        .host(&cfg.db_host)
        .port(cfg.db_port)
        .username(&cfg.db_user)
        .password(&cfg.db_password)
        .database(&cfg.db_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pg_options_come_from_db_fields() {
        let cfg = Config {
            db_host: "db.internal".into(),
            db_port: 6543,
            db_user: "albums".into(),
            db_name: "records".into(),
            ..Config::default()
        };
        let opts = pg_connect_options(&cfg).unwrap();
        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 6543);
        assert_eq!(opts.get_username(), "albums");
        assert_eq!(opts.get_database(), Some("records"));
    }

    #[test]
    fn explicit_url_wins_over_fields() {
        let cfg = Config {
            database_url: Some("postgres://u:p@elsewhere:5555/other".into()),
            ..Config::default()
        };
        let opts = pg_connect_options(&cfg).unwrap();
        assert_eq!(opts.get_host(), "elsewhere");
        assert_eq!(opts.get_port(), 5555);
        assert_eq!(opts.get_database(), Some("other"));
    }

    #[tokio::test]
    async fn sqlite_store_bootstraps_with_schema() {
        let mut path = std::env::temp_dir();
        path.push(format!("albums-bootstrap-{}.sqlite", std::process::id()));
        let cfg = Config {
            store: StoreKind::Sqlite,
            database_url: Some(format!("sqlite:{}", path.display())),
            ..Config::default()
        };

        let (store, pool) = build_store(&cfg).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
        pool.close().await;

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn memory_store_is_seeded() {
        let cfg = Config {
            store: StoreKind::Memory,
            ..Config::default()
        };
        let (store, _pool) = build_store(&cfg).await.unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 3);
    }
}
