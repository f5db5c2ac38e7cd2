//! HTTP API served by the pass-through

pub mod dto;
pub mod health;
pub mod initiate_call;
pub mod metrics_handler;
pub mod router;

pub use initiate_call::AppState;
pub use metrics_handler::{init_metrics, metrics_handler};
pub use router::build_router;
