//! Interface layer - External interfaces
//!
//! This layer handles:
//! - The click-to-call pass-through endpoint
//! - Health and metrics endpoints
//! - Request/response formatting

pub mod api;
