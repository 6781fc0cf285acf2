//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod channel;
mod repository;
mod workflow;

pub use channel::ChannelConnector;
pub use repository::{
    BusinessKeyRepository, OperationsRepository, TaskRepository, TransactionRequestRepository,
    TransferRepository, VariableRepository,
};
pub use workflow::WorkflowTrigger;
