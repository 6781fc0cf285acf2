//! Transfer domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Key of one workflow-engine process instance.
pub type WorkflowInstanceKey = i64;

/// Which leg of a funds movement a transfer record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferDirection {
    /// Funds received by the hub from another participant
    Incoming,
    /// Funds sent by the hub to another participant
    Outgoing,
}

impl TransferDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferDirection::Incoming => "INCOMING",
            TransferDirection::Outgoing => "OUTGOING",
        }
    }
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOMING" => Ok(TransferDirection::Incoming),
            "OUTGOING" => Ok(TransferDirection::Outgoing),
            other => Err(DomainError::UnknownDirection(other.to_string())),
        }
    }
}

/// Lifecycle state of a transfer, driven by the workflow engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "PENDING",
            TransferStatus::InProgress => "IN_PROGRESS",
            TransferStatus::Completed => "COMPLETED",
            TransferStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TransferStatus::Pending),
            "IN_PROGRESS" => Ok(TransferStatus::InProgress),
            "COMPLETED" => Ok(TransferStatus::Completed),
            "FAILED" => Ok(TransferStatus::Failed),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// One leg of an interbank funds movement.
///
/// Immutable once completed; only the workflow engine moves the status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Hub-wide transaction identifier
    #[schema(example = "txn-20240101-0001")]
    pub transaction_id: String,
    /// Workflow instance that executed this transfer
    pub workflow_instance_key: WorkflowInstanceKey,
    pub direction: TransferDirection,
    pub status: TransferStatus,
    #[schema(example = "123456789")]
    pub payer_party_id: String,
    #[schema(example = "MSISDN")]
    pub payer_party_id_type: String,
    #[schema(example = "987654321")]
    pub payee_party_id: String,
    #[schema(example = "MSISDN")]
    pub payee_party_id_type: String,
    /// Exact amount, scale preserved as stored
    #[schema(value_type = String, example = "10.50")]
    pub amount: Decimal,
    #[schema(example = "EUR")]
    pub currency: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Transfer {
    /// Whether a refund or recall may be initiated against this transfer.
    pub fn is_compensable(&self) -> bool {
        self.direction == TransferDirection::Incoming && self.status == TransferStatus::Completed
    }
}
