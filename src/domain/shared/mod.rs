//! Shared kernel - Common types and helpers used across the domain

pub mod error;
pub mod lenient;
pub mod result;
pub mod value_objects;

pub use error::DomainError;
pub use result::Result;
pub use value_objects::*;
