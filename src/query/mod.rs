//! Operations that run against an open session.

pub mod executor;
pub mod introspector;

pub use executor::{execute, EXECUTE_FALLBACK};
pub use introspector::{fetch_schema, SCHEMA_FALLBACK};
