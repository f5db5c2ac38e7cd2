//! clickdial - Click-to-call pass-through service and dialer client core
//!
//! The server side is a stateless pass-through that forwards call-initiation
//! requests to a telephony vendor's click-to-call API. The client side holds
//! explicit application state and talks to the backend REST API for
//! authentication, contacts and recent calls.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;
