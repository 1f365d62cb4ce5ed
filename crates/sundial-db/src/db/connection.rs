use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::db::DbProvider;
use crate::error::{DbError, DbResult};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// ## Summary
/// Creates the SQLite connection pool and applies any pending migrations.
/// The database file is created on first use.
///
/// ## Errors
/// Returns an error if the pool cannot be built or a migration fails.
#[tracing::instrument(skip(database_file), fields(pool_size = size))]
pub fn create_pool(database_file: &str, size: u32) -> anyhow::Result<DbPool> {
    tracing::debug!(file = database_file, "Creating database connection pool");

    let manager = ConnectionManager::<SqliteConnection>::new(database_file);

    let pool = Pool::builder().max_size(size).build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    tracing::info!(
        pool_size = size,
        "Database connection pool created successfully"
    );

    Ok(pool)
}

/// ## Summary
/// Applies pending embedded migrations on the given connection.
///
/// ## Errors
/// Returns an error if any migration fails to apply.
pub fn run_migrations(conn: &mut SqliteConnection) -> DbResult<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbError::MigrationError(e.to_string()))?;
    Ok(())
}

impl DbProvider for DbPool {
    fn get_connection(&self) -> DbResult<DbConnection> {
        Ok(self.get()?)
    }
}
