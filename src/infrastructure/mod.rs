//! Infrastructure layer - Technical implementations
//!
//! This layer contains:
//! - The vendor click-to-call gateway and form codec
//! - The backend REST API client
//! - The client for the local pass-through

pub mod backend;
pub mod dial_client;
pub mod vendor;
