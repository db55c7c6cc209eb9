//! Integration tests for db-gateway.

pub mod common;
pub mod config_test;
pub mod connection_test;
pub mod http_test;
pub mod mysql_test;
