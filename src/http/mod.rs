//! HTTP surface of the gateway.
//!
//! Two JSON endpoints under `/api` plus a health probe. Failures render as
//! `{error, statusCode, statusMessage, message}` with the classified status.

mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use routes::configure;
pub use server::run;
