//! Database connection pool and migration utilities.

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply pending schema migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_ordered() {
        let versions: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        assert_eq!(versions, sorted);
        assert!(versions.len() >= 2);
    }

    #[test]
    fn one_pending_application_per_user_is_enforced() {
        let index = MIGRATOR
            .iter()
            .find(|m| m.sql.contains("uniq_pending_application_per_user"))
            .expect("pending application index migration");
        assert!(index.sql.contains("CREATE UNIQUE INDEX"));
        assert!(index.sql.contains("WHERE status = 'pending'"));
    }
}
