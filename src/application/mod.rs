//! Application layer - Client use cases over explicit state
//!
//! This layer orchestrates domain records and infrastructure clients:
//! - Application state slices with single-writer updates
//! - Login, logout and sign-up
//! - Contact and recent-call retrieval under a fetch policy
//! - Dialing and call initiation
//! - View-scoped cancellable tasks
//! - One client object wiring all of the above

pub mod auth;
pub mod client;
pub mod dialer;
pub mod directory;
pub mod state;
pub mod view_task;

pub use auth::AuthService;
pub use client::DialerClient;
pub use dialer::{DialIntent, DialerService};
pub use directory::{CallHistory, ContactDirectory, FetchPolicy};
pub use state::{AuthState, CallParty, ClientState};
pub use view_task::ViewTask;
