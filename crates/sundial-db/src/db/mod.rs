use crate::error::DbResult;

pub mod connection;
pub mod query;
pub mod schema;

/// Handle that can hand out pooled database connections. Injected into the
/// request depot so handlers stay independent of the concrete pool type.
pub trait DbProvider: Send + Sync {
    /// ## Errors
    /// Returns an error if the pool has no connection available.
    fn get_connection(&self) -> DbResult<connection::DbConnection>;
}
