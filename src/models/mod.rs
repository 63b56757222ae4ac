//! Database models and server configuration.

pub mod advocate;
#[cfg(feature = "server")]
pub mod config;
