pub mod zone_repo;

use sqlx::SqlitePool;

pub type Db = SqlitePool;

pub async fn init_db(path: &std::path::Path) -> anyhow::Result<Db> {
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let pool = SqlitePool::connect(&url).await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

/// In-memory pool with migrations applied, for unit tests.
#[cfg(test)]
pub(crate) async fn test_pool() -> Db {
    use sqlx::sqlite::SqlitePoolOptions;

    // One connection only: each :memory: connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::migrate!().run(&pool).await.expect("migrations");
    pool
}
