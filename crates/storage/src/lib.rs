//! Database backends for learnpal.
//!
//! Both backends implement `learnpal_core::Store`. [`connect`] picks one from
//! the scheme of the configured database URL.

#[cfg(any(feature = "sqlite", feature = "postgres"))]
mod rows;
pub mod schema;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use std::sync::Arc;

use learnpal_core::{Store, StoreError};

/// Open a store for `url` without creating tables.
///
/// `sqlite:` URLs go to SQLite, `postgres://` and `postgresql://` to
/// PostgreSQL. A backend compiled out by features is reported as a
/// connection error.
pub async fn connect(url: &str, max_connections: u32) -> Result<Arc<dyn Store>, StoreError> {
    if url.starts_with("sqlite:") {
        #[cfg(feature = "sqlite")]
        {
            return Ok(Arc::new(SqliteStore::connect(url, max_connections).await?));
        }
        #[cfg(not(feature = "sqlite"))]
        {
            return Err(StoreError::Connection(
                "built without the `sqlite` feature".into(),
            ));
        }
    }

    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        #[cfg(feature = "postgres")]
        {
            return Ok(Arc::new(PostgresStore::connect(url, max_connections).await?));
        }
        #[cfg(not(feature = "postgres"))]
        {
            return Err(StoreError::Connection(
                "built without the `postgres` feature".into(),
            ));
        }
    }

    let scheme = url.split(':').next().unwrap_or_default();
    Err(StoreError::Connection(format!(
        "Unsupported database URL scheme '{scheme}'"
    )))
}
