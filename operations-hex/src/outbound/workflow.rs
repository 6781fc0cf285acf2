//! Workflow engine REST client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use operations_types::{StartProcessInstance, UpstreamError, WorkflowTrigger};

use super::{join_url, unavailable};

/// Default path of the engine's create-process-instance endpoint.
pub const DEFAULT_START_PATH: &str = "/v2/process-instances";

/// Version selector meaning "latest deployed version".
const LATEST_VERSION: i32 = -1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProcessInstanceRequest<'a> {
    process_definition_id: &'a str,
    process_definition_version: i32,
    variables: &'a Map<String, Value>,
}

/// Starts process instances through the workflow engine's REST gateway.
pub struct HttpWorkflowTrigger {
    client: reqwest::Client,
    start_url: String,
}

impl HttpWorkflowTrigger {
    pub fn new(base_url: &str, start_path: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            start_url: join_url(base_url, start_path),
        })
    }
}

#[async_trait]
impl WorkflowTrigger for HttpWorkflowTrigger {
    #[tracing::instrument(skip(self, command), fields(process = %command.bpmn_process_id))]
    async fn start_process_instance(
        &self,
        command: StartProcessInstance,
    ) -> Result<(), UpstreamError> {
        let body = CreateProcessInstanceRequest {
            process_definition_id: &command.bpmn_process_id,
            process_definition_version: LATEST_VERSION,
            variables: &command.variables,
        };

        let response = self
            .client
            .post(&self.start_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| unavailable("workflow engine", e))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Process instance of {} submitted", command.bpmn_process_id);
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        tracing::error!(
            status = status.as_u16(),
            "Workflow engine rejected process {}: {}",
            command.bpmn_process_id,
            message
        );
        Err(UpstreamError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
