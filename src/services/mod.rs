//! Business logic behind the HTTP handlers, generic over repository traits.

pub mod advocates;
pub mod errors;
pub mod main;
pub mod seed;

pub use errors::{ServiceError, ServiceResult};
