//! Workflow engine port.

use crate::dto::StartProcessInstance;
use crate::error::UpstreamError;

/// Starts process instances on the workflow engine.
///
/// Success means the engine accepted the submission; the business outcome of
/// the started process is not observed here.
#[async_trait::async_trait]
pub trait WorkflowTrigger: Send + Sync + 'static {
    async fn start_process_instance(
        &self,
        command: StartProcessInstance,
    ) -> Result<(), UpstreamError>;
}
