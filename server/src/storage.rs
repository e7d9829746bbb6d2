use dioxus::fullstack::Lazy;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use types::Result;

use crate::CONFIG;
pub use session::Session;

pub mod device_type;
mod session;

pub(crate) static POOL: Lazy<SqlitePool> = Lazy::new(|| async {
    tokio::fs::create_dir_all(&CONFIG.data_dir).await?;

    let options = SqliteConnectOptions::new()
        .filename(CONFIG.db_path())
        .foreign_keys(true)
        .create_if_missing(true);

    SqlitePool::connect_with(options).await
});

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    Ok(sqlx::migrate!("../migrations").run(pool).await?)
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrate(&pool).await.unwrap();
    pool
}
