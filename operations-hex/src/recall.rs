//! Recall Orchestrator.
//!
//! Starts the workflow that recalls a completed incoming transfer. The
//! payment scheme decides between the instant and the batch recall process;
//! the variables the process needs are taken from the original transfer's
//! workflow instance.

use std::sync::Arc;

use operations_types::{
    AppError, BatchRecallVars, InstantRecallVars, PaymentScheme, RecallCommon, RecallVariables,
    StartProcessInstance, Transfer, VariableRepository, WorkflowTrigger, decode_value,
};

use crate::requester::requester_comment;

/// Process definition ids of the two recall flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecallProcesses {
    pub instant: String,
    pub batch: String,
}

impl Default for RecallProcesses {
    fn default() -> Self {
        Self {
            instant: "recall_instant".to_string(),
            batch: "recall_batch".to_string(),
        }
    }
}

impl RecallProcesses {
    pub fn for_scheme(&self, scheme: PaymentScheme) -> &str {
        match scheme {
            PaymentScheme::Instant => &self.instant,
            PaymentScheme::Batch => &self.batch,
        }
    }
}

/// Transfer variable names read when preparing a recall.
pub mod variable_names {
    pub const IBAN: &str = "iban";
    pub const TENANT_IDENTIFIER: &str = "tenantIdentifier";
    pub const TRANSACTION_GROUP_ID: &str = "transactionGroupId";
    pub const DEBTOR_IBAN: &str = "debtorIban";
    pub const TRANSACTION_ID: &str = "transactionId";
    pub const GENERATED_PACS008: &str = "generatedPacs008";
    pub const GENERATED_PACS008_FRAGMENT: &str = "generatedPacs008Fragment";
    pub const FILE_METADATA: &str = "fileMetadata";
    pub const PAYMENT_SCHEME: &str = "paymentScheme";
}

use variable_names as names;

pub struct RecallOrchestrator<V: VariableRepository> {
    variables: Arc<V>,
    workflow: Arc<dyn WorkflowTrigger>,
    processes: RecallProcesses,
}

impl<V: VariableRepository> RecallOrchestrator<V> {
    pub fn new(
        variables: Arc<V>,
        workflow: Arc<dyn WorkflowTrigger>,
        processes: RecallProcesses,
    ) -> Self {
        Self {
            variables,
            workflow,
            processes,
        }
    }

    /// Starts exactly one recall workflow for `transfer`.
    ///
    /// Submission failures are returned to the caller and never retried.
    #[tracing::instrument(skip(self, request_body, transfer), fields(transaction_id = %transfer.transaction_id))]
    pub async fn start_recall(
        &self,
        tenant_id: &str,
        request_body: &str,
        payment_scheme: &str,
        transfer: &Transfer,
    ) -> Result<(), AppError> {
        let command = self
            .prepare(tenant_id, request_body, payment_scheme, transfer)
            .await?;

        tracing::debug!(
            "starting BPMN {} for paymentScheme {} using variables: {:?}",
            command.bpmn_process_id,
            payment_scheme,
            command.variables
        );

        self.workflow.start_process_instance(command).await?;
        Ok(())
    }

    /// Assembles the start command without submitting it.
    ///
    /// `tenantIdentifier` always comes from the transfer's variables; a
    /// different requesting tenant is only logged.
    async fn prepare(
        &self,
        tenant_id: &str,
        request_body: &str,
        payment_scheme: &str,
        transfer: &Transfer,
    ) -> Result<StartProcessInstance, AppError> {
        let comment = match requester_comment(request_body) {
            Ok(comment) => comment,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Could not parse recall request body {}, can not set comment on recall!",
                    request_body
                );
                None
            }
        };

        let transaction_id = self.transfer_variable(transfer, names::TRANSACTION_ID).await?;
        let tenant_identifier = self
            .transfer_variable(transfer, names::TENANT_IDENTIFIER)
            .await?;
        if !tenant_identifier.is_empty() && tenant_identifier != tenant_id {
            tracing::warn!(
                requesting_tenant = tenant_id,
                "transfer {} belongs to tenant {}, recalling on its behalf",
                transfer.transaction_id,
                tenant_identifier
            );
        }

        let common = RecallCommon {
            iban: self.transfer_variable(transfer, names::IBAN).await?,
            creditor_iban: self.transfer_variable(transfer, names::DEBTOR_IBAN).await?,
            transaction_group_id: self
                .transfer_variable(transfer, names::TRANSACTION_GROUP_ID)
                .await?,
            internal_correlation_id: transaction_id.clone(),
            tenant_identifier,
            original_pacs008_transaction_identification: transaction_id,
            recall_reason: comment.clone(),
        };

        let scheme = PaymentScheme::from_discriminator(payment_scheme);
        let variables = match scheme {
            PaymentScheme::Instant => RecallVariables::Instant(InstantRecallVars {
                common,
                original_pacs008: self
                    .transfer_variable(transfer, names::GENERATED_PACS008)
                    .await?,
                recall_additional_information: comment,
            }),
            PaymentScheme::Batch => RecallVariables::Batch(BatchRecallVars {
                common,
                original_pacs008: self
                    .transfer_variable(transfer, names::GENERATED_PACS008_FRAGMENT)
                    .await?,
                original_file_metadata: self
                    .transfer_variable(transfer, names::FILE_METADATA)
                    .await?,
            }),
        };

        let variables = variables
            .to_variable_map()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(StartProcessInstance {
            bpmn_process_id: self.processes.for_scheme(scheme).to_string(),
            variables,
        })
    }

    /// Reads one variable of the transfer's workflow instance.
    ///
    /// The stored value is decoded once and otherwise forwarded as is. A
    /// missing variable is not an error: it resolves to the empty string and
    /// is logged. Store failures still propagate.
    pub async fn transfer_variable(
        &self,
        transfer: &Transfer,
        name: &str,
    ) -> Result<String, AppError> {
        let variable = self
            .variables
            .find_variable(transfer.workflow_instance_key, name)
            .await?;

        Ok(match variable {
            Some(variable) => decode_value(&variable.value),
            None => {
                tracing::warn!(
                    "variable {} not found for transfer {}",
                    name,
                    transfer.workflow_instance_key
                );
                String::new()
            }
        })
    }
}
