//! Driver abstraction.
//!
//! A `Driver` knows how to speak one database wire protocol and turns
//! `ConnectionParameters` into an open `Session`. The factory only talks to
//! this seam, so the MySQL client can be swapped for a scripted one in tests.

use crate::error::{DbError, DbResult};
use crate::models::{ConnectionParameters, DatabaseType};

/// A client library able to open sessions for some database types.
#[allow(async_fn_in_trait)]
pub trait Driver {
    type Session: Session;

    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this driver can open sessions for the given database type.
    fn supports(&self, db_type: DatabaseType) -> bool;

    /// Open one session. No retries.
    async fn connect(&self, params: &ConnectionParameters) -> DbResult<Self::Session>;
}

/// A live session with the database.
///
/// Dropping a session must release its network resource; `close` does the
/// same gracefully and reports protocol errors.
#[allow(async_fn_in_trait)]
pub trait Session: Sized {
    /// Round-trip to the server to prove the session is usable.
    async fn ping(&mut self) -> DbResult<()>;

    async fn server_version(&mut self) -> DbResult<String>;

    /// Close the session, consuming it.
    async fn close(self) -> DbResult<()>;
}

/// Resolve the configured driver name and check that `driver` can serve it.
///
/// This is the equivalent of locating the client library: an unknown name or
/// a database family without a built-in client is `DriverUnavailable`.
pub fn resolve<D: Driver>(driver: &D, name: &str) -> DbResult<DatabaseType> {
    let db_type = DatabaseType::from_driver_name(name).ok_or_else(|| {
        DbError::driver_unavailable(name, "no client library is registered under this name")
    })?;

    if !driver.supports(db_type) {
        return Err(DbError::driver_unavailable(
            name,
            format!(
                "{} support is not built into this binary (available: {})",
                db_type,
                driver.name()
            ),
        ));
    }

    Ok(db_type)
}
