//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

pub(crate) mod handlers;
mod rate_limit;
mod server;
mod tenant;

pub use handlers::RECALL_ACCEPTED;
pub use rate_limit::RETRY_AFTER_SECONDS;
pub use server::HttpServer;
pub use tenant::TenantId;
