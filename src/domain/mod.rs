//! Domain layer - Core records and the pure rules over them
//!
//! This layer contains:
//! - Call requests and dial pad input shaping
//! - Contacts and their grouped/filtered views
//! - Recent-call history
//! - Session and user profile records

pub mod call;
pub mod call_history;
pub mod contact;
pub mod session;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
