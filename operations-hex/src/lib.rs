//! # Operations Hex
//!
//! Application service layer and adapters for the payment-hub operations
//! service.
//!
//! ## Architecture
//!
//! - `service` - Application service (compensation preconditions, read views)
//! - `refund` / `recall` - Compensation builders
//! - `inbound/` - HTTP adapter (Axum server)
//! - `outbound/` - HTTP clients for the channel connector and workflow engine
//!
//! The service is generic over `R: OperationsRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod outbound;
pub mod recall;
pub mod refund;
pub mod requester;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use recall::RecallProcesses;
pub use service::OperationsService;
