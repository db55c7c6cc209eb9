//! Connection lifecycle for the gateway.
//!
//! Opens one session per request and guarantees it is released.

pub mod scope;

pub use scope::{open_session, teardown, with_session};
