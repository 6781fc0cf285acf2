//! External correlation keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transfer::WorkflowInstanceKey;

/// Maps an external reference onto one workflow instance.
///
/// The same key may point at several instances (and one instance may carry
/// several keys), which is how all transfers of one business case are found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessKey {
    #[schema(example = "e2e-0001")]
    pub business_key: String,
    #[schema(example = "transactionId")]
    pub business_key_type: String,
    pub workflow_instance_key: WorkflowInstanceKey,
    pub timestamp: DateTime<Utc>,
}
