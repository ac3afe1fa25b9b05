//! Connection factory.
//!
//! Turns a validated set of `ConnectionParameters` into a live
//! `ConnectionHandle`, one attempt per call.

use crate::db::driver::{self, Driver};
use crate::db::handle::ConnectionHandle;
use crate::db::mysql::MySqlDriver;
use crate::error::DbResult;
use crate::models::ConnectionParameters;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct ConnectionFactory<D: Driver = MySqlDriver> {
    driver: D,
    params: ConnectionParameters,
}

impl ConnectionFactory<MySqlDriver> {
    /// Create a factory backed by the built-in MySQL driver.
    pub fn mysql(params: ConnectionParameters) -> Self {
        Self::new(MySqlDriver::new(), params)
    }

    /// Look up the driver named in `params` among the built-in drivers.
    ///
    /// Fails with `DriverUnavailable` up front instead of on the first
    /// `get_connection` call.
    pub fn from_params(params: ConnectionParameters) -> DbResult<Self> {
        let driver = MySqlDriver::new();
        driver::resolve(&driver, params.driver())?;
        Ok(Self::new(driver, params))
    }
}

impl<D: Driver> ConnectionFactory<D> {
    pub fn new(driver: D, params: ConnectionParameters) -> Self {
        Self { driver, params }
    }

    /// Open a new connection.
    ///
    /// Fails with `DriverUnavailable` when the configured driver cannot be
    /// located, and with `ConnectionFailure` when the handshake fails or times
    /// out. Failures are returned as-is; nothing is retried and no session is
    /// left open.
    pub async fn get_connection(&self) -> DbResult<ConnectionHandle<D::Session>> {
        let target = self.params.masked_url();
        let db_type = driver::resolve(&self.driver, self.params.driver()).inspect_err(|e| {
            error!(driver = %self.params.driver(), error = %e, "Database driver not found");
        })?;

        info!(
            driver = %self.driver.name(),
            db_type = %db_type,
            host = %self.params.host(),
            port = self.params.port(),
            database = %self.params.database(),
            "Connecting to database"
        );

        let session = self.driver.connect(&self.params).await.inspect_err(|e| {
            error!(url = %target, error = %e, "Connection attempt failed");
        })?;

        info!(url = %target, "Connected successfully");
        Ok(ConnectionHandle::new(session, target))
    }
}
