//! One-shot connection check.
//!
//! The bootstrapper asks the factory for a single connection, proves it is
//! usable, reports the result to the operator and releases the connection.

use crate::db::{ConnectionFactory, Driver, Session};
use crate::error::{DbError, DbResult};
use std::io::{self, Write};
use tracing::{info, warn};

pub const BANNER: &str = "Starting the inventory management system...";
pub const SUCCESS_MESSAGE: &str = "Database connection established successfully!";
pub const OPERATOR_HINT: &str =
    "Check that the database server is running and that the configured credentials are correct.";

/// Exit status for a successful connection check.
pub const EXIT_CONNECTED: u8 = 0;
/// Exit status when the handshake failed.
pub const EXIT_CONNECTION_FAILURE: u8 = 1;
/// Exit status for unusable configuration.
pub const EXIT_INVALID_CONFIG: u8 = 2;
/// Exit status when no driver could be located.
pub const EXIT_DRIVER_UNAVAILABLE: u8 = 3;

/// Result of one bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Connected { server_version: String },
    DriverUnavailable { cause: String },
    ConnectionFailure { cause: String },
}

impl Outcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    /// Process exit status for this outcome.
    ///
    /// With `always_exit_zero`, runtime failures are reported on stderr only
    /// and the process still exits with 0.
    pub fn exit_code(&self, always_exit_zero: bool) -> u8 {
        match self {
            Self::Connected { .. } => EXIT_CONNECTED,
            _ if always_exit_zero => EXIT_CONNECTED,
            Self::ConnectionFailure { .. } => EXIT_CONNECTION_FAILURE,
            Self::DriverUnavailable { .. } => EXIT_DRIVER_UNAVAILABLE,
        }
    }
}

#[derive(Debug)]
pub struct Bootstrapper<D: Driver> {
    factory: ConnectionFactory<D>,
}

impl<D: Driver> Bootstrapper<D> {
    pub fn new(factory: ConnectionFactory<D>) -> Self {
        Self { factory }
    }

    /// Run a single connection check, writing operator messages to `out` and
    /// diagnostics to `err`.
    ///
    /// Connection errors never escape; they become an `Outcome`. Only a
    /// failure to write to the output streams is returned as an error.
    pub async fn run<O, E>(&self, out: &mut O, err: &mut E) -> io::Result<Outcome>
    where
        O: Write,
        E: Write,
    {
        writeln!(out, "{}", BANNER)?;
        out.flush()?;

        let outcome = match self.check().await {
            Ok(server_version) => {
                writeln!(out, "{}", SUCCESS_MESSAGE)?;
                writeln!(out, "Server version: {}", server_version)?;
                Outcome::Connected { server_version }
            }
            Err(DbError::DriverUnavailable { driver, message }) => {
                writeln!(err, "Database driver not found: '{}' ({})", driver, message)?;
                writeln!(err, "{}", OPERATOR_HINT)?;
                Outcome::DriverUnavailable { cause: message }
            }
            Err(e) => {
                writeln!(err, "SQL error while trying to connect: {}", e.cause())?;
                if let Some(suggestion) = e.suggestion() {
                    writeln!(err, "Hint: {}", suggestion)?;
                }
                writeln!(err, "{}", OPERATOR_HINT)?;
                Outcome::ConnectionFailure {
                    cause: e.cause().to_string(),
                }
            }
        };

        out.flush()?;
        err.flush()?;
        info!(connected = outcome.is_connected(), "Bootstrap finished");
        Ok(outcome)
    }

    /// Acquire, verify and release one connection.
    async fn check(&self) -> DbResult<String> {
        let mut handle = self.factory.get_connection().await?;

        let verified = verify(handle.session_mut()).await;

        // Release on both paths before looking at the verification result.
        if let Err(e) = handle.release().await {
            warn!(error = %e, "Failed to close connection cleanly");
        }

        verified
    }
}

async fn verify<S: Session>(session: &mut S) -> DbResult<String> {
    session.ping().await?;
    session.server_version().await
}
