//! Operations Application Service
//!
//! Validates compensation preconditions and delegates to the refund builder,
//! the recall orchestrator and the read model.
//! Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use operations_types::{
    AppError, BusinessKeyRepository, ChannelConnector, ChannelResponse, OperationsRepository, Task,
    TaskRepository, TransactionRequestDetail, TransactionRequestRepository, Transfer,
    TransferDetail, TransferDirection, TransferRepository, Variable, VariableRepository,
    WorkflowInstanceKey, WorkflowTrigger,
};

use crate::recall::{RecallOrchestrator, RecallProcesses, variable_names};
use crate::refund::build_refund_request;

/// Answer given when a compensation targets an ineligible transfer.
pub const NOT_COMPENSABLE_MESSAGE: &str =
    "Requested incoming transfer does not exist or not yet completed!";

/// Application service for operations on transfers.
///
/// Generic over `R: OperationsRepository` - the store adapter is injected at
/// compile time; the outbound collaborators are injected as trait objects.
pub struct OperationsService<R: OperationsRepository> {
    repo: Arc<R>,
    channel: Arc<dyn ChannelConnector>,
    recall: RecallOrchestrator<R>,
}

impl<R: OperationsRepository> OperationsService<R> {
    /// Creates a new operations service.
    pub fn new(
        repo: R,
        channel: Arc<dyn ChannelConnector>,
        workflow: Arc<dyn WorkflowTrigger>,
        processes: RecallProcesses,
    ) -> Self {
        let repo = Arc::new(repo);
        let recall = RecallOrchestrator::new(repo.clone(), workflow, processes);
        Self {
            repo,
            channel,
            recall,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Compensations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Refunds a completed incoming transfer through the channel connector.
    ///
    /// The connector's answer is returned untouched, whatever its status.
    #[tracing::instrument(skip(self, request_body))]
    pub async fn refund(
        &self,
        tenant_id: &str,
        transaction_id: &str,
        request_body: &str,
    ) -> Result<ChannelResponse, AppError> {
        let transfer = self.find_compensable_transfer(transaction_id).await?;
        let request = build_refund_request(request_body, &transfer);

        let response = self.channel.submit_transfer(tenant_id, &request).await?;
        tracing::info!(
            status = response.status,
            "Refund for transfer {} forwarded to channel connector",
            transaction_id
        );
        Ok(response)
    }

    /// Starts the recall workflow for a completed incoming transfer.
    ///
    /// The recall protocol follows the transfer's recorded `paymentScheme`.
    /// A `tenant_id` differing from the transfer's own tenant is logged.
    #[tracing::instrument(skip(self, request_body))]
    pub async fn recall(
        &self,
        tenant_id: &str,
        transaction_id: &str,
        request_body: &str,
    ) -> Result<(), AppError> {
        tracing::info!(
            "Recall transfer request received for transactionId {}",
            transaction_id
        );
        let transfer = self.find_compensable_transfer(transaction_id).await?;
        let payment_scheme = self
            .recall
            .transfer_variable(&transfer, variable_names::PAYMENT_SCHEME)
            .await?;

        self.recall
            .start_recall(tenant_id, request_body, &payment_scheme, &transfer)
            .await
    }

    async fn find_compensable_transfer(&self, transaction_id: &str) -> Result<Transfer, AppError> {
        self.repo
            .find_transfer_by_transaction_id(transaction_id, TransferDirection::Incoming)
            .await?
            .filter(Transfer::is_compensable)
            .ok_or_else(|| AppError::NotFound(NOT_COMPENSABLE_MESSAGE.into()))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Read views
    // ─────────────────────────────────────────────────────────────────────────────

    /// Transfer executed by a workflow instance, with its ordered trace.
    pub async fn transfer_detail(&self, key: WorkflowInstanceKey) -> Result<TransferDetail, AppError> {
        let transfer = self
            .repo
            .find_transfer_by_workflow_instance_key(key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transfer for workflow instance {}", key)))?;

        Ok(TransferDetail {
            transfer,
            tasks: self.repo.list_tasks(key).await?,
            variables: self.unescaped_variables(key).await?,
        })
    }

    /// Transaction request executed by a workflow instance, with its ordered trace.
    pub async fn transaction_request_detail(
        &self,
        key: WorkflowInstanceKey,
    ) -> Result<TransactionRequestDetail, AppError> {
        let transaction_request = self
            .repo
            .find_transaction_request_by_workflow_instance_key(key)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Transaction request for workflow instance {}", key))
            })?;

        Ok(TransactionRequestDetail {
            transaction_request,
            tasks: self.repo.list_tasks(key).await?,
            variables: self.unescaped_variables(key).await?,
        })
    }

    /// Variables of every workflow instance sharing a business key.
    pub async fn variables_by_business_key(
        &self,
        business_key: &str,
        business_key_type: &str,
    ) -> Result<Vec<Vec<Variable>>, AppError> {
        let keys = self.correlated_instances(business_key, business_key_type).await?;
        let mut result = Vec::with_capacity(keys.len());
        for key in keys {
            result.push(self.repo.list_variables(key).await?);
        }
        Ok(result)
    }

    /// Tasks of every workflow instance sharing a business key.
    pub async fn tasks_by_business_key(
        &self,
        business_key: &str,
        business_key_type: &str,
    ) -> Result<Vec<Vec<Task>>, AppError> {
        let keys = self.correlated_instances(business_key, business_key_type).await?;
        let mut result = Vec::with_capacity(keys.len());
        for key in keys {
            result.push(self.repo.list_tasks(key).await?);
        }
        Ok(result)
    }

    async fn correlated_instances(
        &self,
        business_key: &str,
        business_key_type: &str,
    ) -> Result<Vec<WorkflowInstanceKey>, AppError> {
        let keys = self
            .repo
            .find_business_keys(business_key, business_key_type)
            .await?;
        tracing::debug!(
            "loaded {} transfer(s) for business key {} of type {}",
            keys.len(),
            business_key,
            business_key_type
        );
        Ok(keys.into_iter().map(|k| k.workflow_instance_key).collect())
    }

    async fn unescaped_variables(&self, key: WorkflowInstanceKey) -> Result<Vec<Variable>, AppError> {
        let variables = self.repo.list_variables(key).await?;
        Ok(variables.into_iter().map(Variable::unescaped).collect())
    }
}
