pub mod schema;
pub mod stared_release;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{self as diesel_r2d2, ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;
use tracing::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel_r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel_r2d2::Error> {
        // WAL lets readers proceed while a sync transaction is open
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL;")
            .map_err(diesel_r2d2::Error::QueryError)
    }
}

#[derive(Debug, Error)]
pub enum InitPoolError {
    #[error("BuildPool: {source}")]
    BuildPool {
        source: r2d2::Error,
    },
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        source: r2d2::Error,
    },
    #[error("RunMigrations: {message}")]
    RunMigrations {
        message: String,
    },
}

/// Opens the pool and applies pending migrations.
pub fn init_pool(database_url: &str) -> Result<SqlitePool, InitPoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .map_err(|source| InitPoolError::BuildPool { source })?;

    let mut pooled = pool
        .get()
        .map_err(|source| InitPoolError::GetConnectionFromPool { source })?;
    let conn: &mut SqliteConnection = &mut pooled;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|source| InitPoolError::RunMigrations { message: source.to_string() })?;
    info!(database_url, applied = applied.len(), "database ready");

    Ok(pool)
}
