//! Workflow task records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transfer::WorkflowInstanceKey;

/// One task execution event exported by the workflow engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub workflow_instance_key: WorkflowInstanceKey,
    /// BPMN element the task belongs to
    #[schema(example = "Task_SendToChannel")]
    pub element_id: String,
    #[schema(example = "send-to-channel")]
    pub task_type: String,
    /// Engine intent, e.g. `ACTIVATED` or `COMPLETED`
    #[schema(example = "COMPLETED")]
    pub intent: String,
    pub timestamp: DateTime<Utc>,
}
