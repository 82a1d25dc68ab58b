//! Database module: SQL-backed album stores.
//!
//! Layout:
//! - `models.rs`: row struct mirroring the `album` table
//! - `schema.rs`: DDL for initializing the table
//! - `sqlite.rs` / `postgres.rs`: `AlbumStore` implementations over sqlx pools

pub mod models;
pub mod postgres;
pub mod schema;
pub mod sqlite;

pub use models::DbAlbum;
pub use postgres::{PgAlbumModel, PgPool};
pub use sqlite::{SqliteAlbumModel, SqlitePool};
