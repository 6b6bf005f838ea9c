//! Shared fixtures for integration tests.

use diesel_migrations::MigrationHarness;
use pushkind_repository::db::{
    ConnectionOptions, DbPool, MIGRATIONS, establish_connection_pool_with,
};
use tempfile::TempDir;

/// Temporary SQLite database with every migration applied. The file is
/// removed when the value is dropped.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 path").to_string();

        let pool = establish_connection_pool_with(
            &url,
            ConnectionOptions {
                enable_wal: false,
                ..ConnectionOptions::default()
            },
        )
        .expect("create pool");

        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
