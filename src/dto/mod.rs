//! DTO modules that bridge services with templates and APIs.

pub mod advocates;
pub mod api;
pub mod main;
