//! Transaction request (request-to-pay) domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transfer::{TransferDirection, WorkflowInstanceKey};

/// A payee-initiated request for funds, tracked by its own workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub workflow_instance_key: WorkflowInstanceKey,
    #[schema(example = "txn-20240101-0002")]
    pub transaction_id: String,
    pub direction: TransferDirection,
    /// Workflow-reported state, e.g. `IN_PROGRESS`, `ACCEPTED`, `REJECTED`
    #[schema(example = "ACCEPTED")]
    pub state: String,
    pub payer_party_id: String,
    pub payee_party_id: String,
    #[schema(value_type = String, example = "25.00")]
    pub amount: Decimal,
    #[schema(example = "EUR")]
    pub currency: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
