use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw (unprefixed) variables kept for compatibility with existing deployments.
const RAW_DB_KEYS: &[&str] = &[
    "database_url",
    "db_host",
    "db_port",
    "db_user",
    "db_password",
    "db_name",
];

/// Which backend serves album data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    Sqlite,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub loglevel: String,
    pub store: StoreKind,
    /// Explicit connection URL; overrides the `db_*` fields when set.
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            loglevel: "info".to_string(),
            store: StoreKind::Postgres,
            database_url: None,
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_user: "postgres".to_string(),
            db_password: String::new(),
            db_name: "recordings".to_string(),
            max_connections: 10,
            connect_timeout_secs: 5,
            request_timeout_secs: 15,
        }
    }
}

impl Config {
    /// Defaults, then raw `DB_*` / `DATABASE_URL`, then `ALBUMS_*` overrides.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(RAW_DB_KEYS))
            .merge(Env::prefixed("ALBUMS_"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn sqlite_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or("sqlite://albums.db")
    }
}
