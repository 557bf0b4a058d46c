use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Creates both tables when they do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id TEXT    NOT NULL UNIQUE,
            full_name   TEXT    NOT NULL,
            email       TEXT    NOT NULL UNIQUE,
            department  TEXT    NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // one record per employee per day, also guarded before insert
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            date        TEXT    NOT NULL,
            status      TEXT    NOT NULL CHECK (status IN ('Present', 'Absent')),
            UNIQUE (employee_id, date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance (date)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    // a second connection would see a different in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    init_schema(&pool).await.unwrap();
    pool
}

/// File-backed pool with several connections, for tests that need real concurrency.
#[cfg(test)]
pub async fn file_test_pool(path: &std::path::Path) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
        .unwrap();

    init_schema(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn schema_is_idempotent() {
        let pool = test_pool().await;
        init_schema(&pool).await.unwrap();
        ping(&pool).await.unwrap();
    }

    #[actix_web::test]
    async fn ping_fails_on_closed_pool() {
        let pool = test_pool().await;
        pool.close().await;
        assert!(ping(&pool).await.is_err());
    }
}
