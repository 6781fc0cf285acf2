//! Transfer Store port traits.
//!
//! The store is written by the workflow exporter; this service only reads
//! it. Adapters (Postgres, SQLite, in-memory fakes) implement these traits.

use crate::domain::{
    BusinessKey, Task, TransactionRequest, Transfer, TransferDirection, Variable,
    WorkflowInstanceKey,
};
use crate::error::RepoError;

#[async_trait::async_trait]
pub trait TransferRepository: Send + Sync + 'static {
    /// First transfer with the given transaction id and direction.
    async fn find_transfer_by_transaction_id(
        &self,
        transaction_id: &str,
        direction: TransferDirection,
    ) -> Result<Option<Transfer>, RepoError>;

    /// First transfer executed by the given workflow instance.
    async fn find_transfer_by_workflow_instance_key(
        &self,
        key: WorkflowInstanceKey,
    ) -> Result<Option<Transfer>, RepoError>;
}

#[async_trait::async_trait]
pub trait VariableRepository: Send + Sync + 'static {
    /// Latest value of the named variable within one workflow instance.
    async fn find_variable(
        &self,
        key: WorkflowInstanceKey,
        name: &str,
    ) -> Result<Option<Variable>, RepoError>;

    /// All variables of one workflow instance, oldest first.
    async fn list_variables(&self, key: WorkflowInstanceKey) -> Result<Vec<Variable>, RepoError>;
}

#[async_trait::async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// All tasks of one workflow instance, oldest first.
    async fn list_tasks(&self, key: WorkflowInstanceKey) -> Result<Vec<Task>, RepoError>;
}

#[async_trait::async_trait]
pub trait BusinessKeyRepository: Send + Sync + 'static {
    /// Every workflow instance correlated with the given business key.
    async fn find_business_keys(
        &self,
        business_key: &str,
        business_key_type: &str,
    ) -> Result<Vec<BusinessKey>, RepoError>;
}

#[async_trait::async_trait]
pub trait TransactionRequestRepository: Send + Sync + 'static {
    async fn find_transaction_request_by_workflow_instance_key(
        &self,
        key: WorkflowInstanceKey,
    ) -> Result<Option<TransactionRequest>, RepoError>;
}

/// The full read model of the operations service.
pub trait OperationsRepository:
    TransferRepository
    + VariableRepository
    + TaskRepository
    + BusinessKeyRepository
    + TransactionRequestRepository
{
}

impl<T> OperationsRepository for T where
    T: TransferRepository
        + VariableRepository
        + TaskRepository
        + BusinessKeyRepository
        + TransactionRequestRepository
{
}
