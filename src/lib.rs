//! db-gateway - an HTTP gateway for ad-hoc MySQL queries and schema reads.
//!
//! This library exposes the core modules for use by the binary and integration tests.

pub mod config;
pub mod connection;
pub mod db;
pub mod error;
pub mod gateway;
pub mod http;
pub mod logging;
pub mod query;
