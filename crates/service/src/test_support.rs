#![cfg(test)]
use sea_orm::DatabaseConnection;

use models::db::{connect_with_config, DATABASE_URL};

/// DB-backed tests run only when `DATABASE_URL` is set and `SKIP_DB_TESTS` is not.
pub fn skip_db() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}

// Each test migrates the tables it needs; migrations are idempotent.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = configs::DatabaseConfig {
        url: DATABASE_URL.clone(),
        max_connections: 5,
        min_connections: 1,
        acquire_timeout_secs: 10,
        ..Default::default()
    };
    connect_with_config(&cfg).await
}
