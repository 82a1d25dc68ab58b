//! SQL DDL for the `album` table, one flavour per supported database.

/// SQLite schema. `AUTOINCREMENT` keeps ids from being reused after deletes
/// made outside this service.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS album (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    artist TEXT NOT NULL,
    price REAL NOT NULL
);
"#;

/// PostgreSQL schema. Tables created elsewhere with `SERIAL` ids or `NUMERIC`
/// prices are still readable; the select statements cast both columns.
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS album (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(128) NOT NULL,
    artist VARCHAR(255) NOT NULL,
    price DOUBLE PRECISION NOT NULL
);
"#;

/// Split bundled DDL into individual statements; sqlx runs one per query.
pub fn statements(ddl: &str) -> impl Iterator<Item = &str> {
    ddl.split(';').map(str::trim).filter(|s| !s.is_empty())
}
