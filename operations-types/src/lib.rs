//! # Operations Types
//!
//! Domain types and port traits for the payment-hub operations service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Transfers, workflow variables and tasks, recall variable sets
//! - `ports/` - Transfer Store, Workflow Trigger and Channel Connector traits
//! - `dto/` - Data Transfer Objects for API and collaborator boundaries
//! - `error/` - Domain, repository, upstream and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    BatchRecallVars, BusinessKey, InstantRecallVars, PaymentScheme, RecallCommon,
    RecallVariables, Task, TransactionRequest, Transfer, TransferDirection, TransferStatus,
    Variable, WorkflowInstanceKey, decode_value, unescape_value,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError, UpstreamError};
pub use ports::{
    BusinessKeyRepository, ChannelConnector, OperationsRepository, TaskRepository,
    TransactionRequestRepository, TransferRepository, VariableRepository, WorkflowTrigger,
};
