//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Task, TransactionRequest, Transfer, Variable};

/// Header carrying the tenant a request acts for.
pub const TENANT_HEADER: &str = "Platform-TenantId";

// ─────────────────────────────────────────────────────────────────────────────
// Compensation DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Body accepted by the refund and recall endpoints.
///
/// Only documents the expected shape; handlers take the raw text so that a
/// malformed body never blocks a compensation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CompensationRequest {
    /// Free-text reason forwarded to the counterparty
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Customer requested refund")]
    pub comment: Option<String>,
}

/// Structured message body used for acknowledgements and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Requested incoming transfer does not exist or not yet completed!")]
    pub response: String,
}

impl MessageResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Channel connector DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Party identification as understood by the channel connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartyIdInfo {
    #[schema(example = "MSISDN")]
    pub party_id_type: String,
    #[schema(example = "123456789")]
    pub party_identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub party_id_info: PartyIdInfo,
}

impl Party {
    pub fn new(party_id_type: impl Into<String>, party_identifier: impl Into<String>) -> Self {
        Self {
            party_id_info: PartyIdInfo {
                party_id_type: party_id_type.into(),
                party_identifier: party_identifier.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransferAmount {
    /// Exact decimal amount as text
    #[schema(value_type = String, example = "10.50")]
    pub amount: Decimal,
    #[schema(example = "EUR")]
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Extension {
    #[schema(example = "comment")]
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtensionList {
    pub extension: Vec<Extension>,
}

/// Transfer request posted to the channel connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTransferRequest {
    pub payer: Party,
    pub payee: Party,
    pub amount: TransferAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_list: Option<ExtensionList>,
}

/// Verbatim answer of the channel connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Workflow engine DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to start the latest version of a process definition.
#[derive(Debug, Clone, PartialEq)]
pub struct StartProcessInstance {
    /// Symbolic BPMN process id
    pub bpmn_process_id: String,
    pub variables: Map<String, Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Read views
// ─────────────────────────────────────────────────────────────────────────────

/// Transfer with its ordered execution trace.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransferDetail {
    pub transfer: Transfer,
    pub tasks: Vec<Task>,
    pub variables: Vec<Variable>,
}

/// Transaction request with its ordered execution trace.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequestDetail {
    pub transaction_request: TransactionRequest,
    pub tasks: Vec<Task>,
    pub variables: Vec<Variable>,
}

/// Business key filter for the fan-out read views.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BusinessKeyQuery {
    /// External correlation id
    pub business_key: String,
    /// Kind of correlation id, e.g. `transactionId`
    pub business_key_type: String,
}
