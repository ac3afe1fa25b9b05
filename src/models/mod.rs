//! Data models for estoque-db.
//!
//! This module contains the connection parameter types shared by the
//! configuration layer, the connection factory and the drivers.

pub mod connection;

pub use connection::{
    ConnectionParameters, DatabaseType, Password, SessionOptions, SslMode,
};
