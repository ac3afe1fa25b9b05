//! MySQL driver built on sqlx.

use crate::db::driver::{Driver, Session};
use crate::error::{DbError, DbResult};
use crate::models::{ConnectionParameters, DatabaseType, SslMode};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlSslMode};
use sqlx::{ConnectOptions, Connection};
use tracing::debug;

/// Opens single, unpooled MySQL sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDriver;

impl MySqlDriver {
    pub fn new() -> Self {
        Self
    }

    /// Translate connection parameters into sqlx connect options.
    pub fn connect_options(params: &ConnectionParameters) -> MySqlConnectOptions {
        let session = params.session();

        let mut options = MySqlConnectOptions::new()
            .host(params.host())
            .port(params.port())
            .database(params.database())
            .username(params.username())
            .password(params.password().expose())
            .charset(&session.charset);

        if let Some(mode) = session.ssl_mode {
            options = options.ssl_mode(ssl_mode(mode));
        }
        if let Some(tz) = &session.timezone {
            options = options.timezone(Some(tz.clone()));
        }

        options
    }
}

fn ssl_mode(mode: SslMode) -> MySqlSslMode {
    match mode {
        SslMode::Disabled => MySqlSslMode::Disabled,
        SslMode::Preferred => MySqlSslMode::Preferred,
        SslMode::Required => MySqlSslMode::Required,
        SslMode::VerifyCa => MySqlSslMode::VerifyCa,
        SslMode::VerifyIdentity => MySqlSslMode::VerifyIdentity,
    }
}

impl Driver for MySqlDriver {
    type Session = MySqlSession;

    fn name(&self) -> &'static str {
        "mysql"
    }

    fn supports(&self, db_type: DatabaseType) -> bool {
        db_type == DatabaseType::MySQL
    }

    async fn connect(&self, params: &ConnectionParameters) -> DbResult<MySqlSession> {
        let options = Self::connect_options(params);
        let timeout = params.connect_timeout();

        // A timed-out handshake drops the half-open socket with the future.
        let conn = tokio::time::timeout(timeout, options.connect())
            .await
            .map_err(|_| {
                DbError::connection_failure(
                    format!(
                        "Timed out after {}s connecting to {}:{}",
                        timeout.as_secs(),
                        params.host(),
                        params.port()
                    ),
                    "Check that the host name resolves and is reachable from this machine",
                )
            })??;

        debug!(host = %params.host(), port = params.port(), "MySQL handshake complete");
        Ok(MySqlSession { conn })
    }
}

/// A single MySQL connection.
#[derive(Debug)]
pub struct MySqlSession {
    conn: MySqlConnection,
}

impl Session for MySqlSession {
    async fn ping(&mut self) -> DbResult<()> {
        self.conn.ping().await?;
        Ok(())
    }

    async fn server_version(&mut self) -> DbResult<String> {
        let version = sqlx::query_scalar::<_, String>("SELECT version()")
            .fetch_one(&mut self.conn)
            .await?;
        Ok(version)
    }

    async fn close(self) -> DbResult<()> {
        self.conn.close().await?;
        Ok(())
    }
}
