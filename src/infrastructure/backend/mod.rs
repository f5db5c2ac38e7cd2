//! Backend REST API client (auth, contacts, recent calls)

pub mod client;
pub mod dto;
pub mod error;

pub use client::{BackendApi, HttpBackendClient};
#[cfg(test)]
pub use client::MockBackendApi;
pub use dto::{ContactListResponse, LoginResponse, RecentCallsResponse, StatusResponse};
pub use error::ClientError;
