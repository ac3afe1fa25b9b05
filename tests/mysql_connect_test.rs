//! Tests for the MySQL driver.
//!
//! The refused-connection tests need no server. The live tests run only when
//! ESTOQUE_TEST_DATABASE_URL points at a reachable MySQL database, e.g.
//! `mysql://estoque:pw@localhost:3306/estoque_db?useSSL=false&serverTimezone=UTC`.

use estoque_db::db::{ConnectionFactory, Session};
use estoque_db::error::DbError;
use estoque_db::models::{ConnectionParameters, Password};
use estoque_db::{Bootstrapper, Outcome};
use std::collections::BTreeMap;
use std::time::Duration;

fn closed_port_params() -> ConnectionParameters {
    // Port 1 (tcpmux) is never served on test machines.
    ConnectionParameters::new(
        "mysql",
        "127.0.0.1",
        1,
        "estoque_db",
        "estoque",
        Password::new("wrong"),
        BTreeMap::from([("useSSL".to_string(), "false".to_string())]),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn live_params() -> Option<ConnectionParameters> {
    let url = std::env::var("ESTOQUE_TEST_DATABASE_URL").ok()?;
    Some(ConnectionParameters::from_url(&url, Duration::from_secs(10)).unwrap())
}

#[tokio::test]
async fn test_refused_connection_is_connection_failure() {
    let factory = ConnectionFactory::mysql(closed_port_params());

    let err = factory.get_connection().await.unwrap_err();

    match &err {
        DbError::ConnectionFailure { message, .. } => {
            assert!(!message.is_empty());
        }
        other => panic!("expected ConnectionFailure, got {other:?}"),
    }
    assert!(err.suggestion().is_some());
}

#[tokio::test]
async fn test_refused_connection_bootstrap_reports() {
    let bootstrapper = Bootstrapper::new(ConnectionFactory::mysql(closed_port_params()));
    let mut out = Vec::new();
    let mut err = Vec::new();

    let outcome = bootstrapper.run(&mut out, &mut err).await.unwrap();

    assert!(matches!(outcome, Outcome::ConnectionFailure { .. }));
    let err = String::from_utf8(err).unwrap();
    assert!(err.contains("SQL error while trying to connect"));
    assert!(err.contains("Check that the database server is running"));
}

#[tokio::test]
async fn test_live_connection_pings() {
    let Some(params) = live_params() else {
        eprintln!("ESTOQUE_TEST_DATABASE_URL not set, skipping");
        return;
    };

    let factory = ConnectionFactory::mysql(params);
    let mut handle = factory.get_connection().await.unwrap();
    handle.session_mut().ping().await.unwrap();
    let version = handle.session_mut().server_version().await.unwrap();
    assert!(!version.is_empty());
    handle.release().await.unwrap();
}

#[tokio::test]
async fn test_live_bootstrap_is_repeatable() {
    let Some(params) = live_params() else {
        eprintln!("ESTOQUE_TEST_DATABASE_URL not set, skipping");
        return;
    };

    let bootstrapper = Bootstrapper::new(ConnectionFactory::mysql(params));
    for _ in 0..2 {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = bootstrapper.run(&mut out, &mut err).await.unwrap();
        assert!(outcome.is_connected(), "stderr: {}", String::from_utf8_lossy(&err));
        assert!(
            String::from_utf8(out)
                .unwrap()
                .contains("Database connection established successfully!")
        );
    }
}

#[tokio::test]
async fn test_live_wrong_password_is_connection_failure() {
    let Some(params) = live_params() else {
        eprintln!("ESTOQUE_TEST_DATABASE_URL not set, skipping");
        return;
    };

    let wrong = ConnectionParameters::new(
        params.driver(),
        params.host(),
        params.port(),
        params.database(),
        params.username(),
        Password::new(format!("{}-wrong", params.password().expose())),
        params.options().clone(),
        params.connect_timeout(),
    )
    .unwrap();

    let err = ConnectionFactory::mysql(wrong)
        .get_connection()
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ConnectionFailure { .. }));
    assert!(err.suggestion().unwrap().contains("username and password"));
}
