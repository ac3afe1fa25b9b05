//! Database access layer.
//!
//! This module provides:
//! - The driver seam (`Driver` / `Session`) and driver name resolution
//! - The built-in MySQL driver
//! - The connection factory
//! - The RAII connection handle

pub mod driver;
pub mod factory;
pub mod handle;
pub mod mysql;

pub use driver::{Driver, Session};
pub use factory::ConnectionFactory;
pub use handle::ConnectionHandle;
pub use mysql::{MySqlDriver, MySqlSession};
