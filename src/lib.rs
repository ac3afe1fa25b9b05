//! estoque-db library
//!
//! Connection bootstrap for the `estoque_db` inventory database: validated
//! connection parameters, a MySQL connection factory and a one-shot
//! connection check that reports its outcome to the operator.

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use bootstrap::{Bootstrapper, Outcome};
pub use config::Config;
pub use error::DbError;
