//! # Operations Client SDK
//!
//! A typed Rust client for the payment-hub operations API.

use operations_types::{
    CompensationRequest, MessageResponse, TENANT_HEADER, Task, TransactionRequestDetail,
    TransferDetail, Variable, WorkflowInstanceKey,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("A tenant is required for {0}")]
    MissingTenant(&'static str),
}

/// Raw answer to a refund, as relayed from the channel connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundReply {
    pub status: u16,
    pub body: String,
}

impl RefundReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Operations API client.
pub struct OperationsClient {
    base_url: String,
    tenant_id: Option<String>,
    http: Client,
}

impl OperationsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tenant_id: None,
            http: Client::new(),
        }
    }

    /// Sets the tenant sent with compensation requests.
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Refunds a completed incoming transfer.
    ///
    /// Whatever the channel connector answered is returned, including error
    /// statuses; only transport failures are errors.
    pub async fn refund(
        &self,
        transaction_id: &str,
        comment: Option<String>,
    ) -> Result<RefundReply, ClientError> {
        let resp = self
            .compensation(&format!("/api/v1/transfer/{}/refund", transaction_id), comment, "refund")?
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(RefundReply { status, body })
    }

    /// Starts the recall of a completed incoming transfer.
    pub async fn recall(
        &self,
        transaction_id: &str,
        comment: Option<String>,
    ) -> Result<(), ClientError> {
        let resp = self
            .compensation(&format!("/api/v1/transfer/{}/recall", transaction_id), comment, "recall")?
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), body))
    }

    /// Gets the transfer executed by a workflow instance.
    pub async fn transfer_detail(
        &self,
        key: WorkflowInstanceKey,
    ) -> Result<TransferDetail, ClientError> {
        self.get(&format!("/api/v1/transfer/{}", key), &[]).await
    }

    /// Gets the transaction request executed by a workflow instance.
    pub async fn transaction_request_detail(
        &self,
        key: WorkflowInstanceKey,
    ) -> Result<TransactionRequestDetail, ClientError> {
        self.get(&format!("/api/v1/transactionRequest/{}", key), &[])
            .await
    }

    /// Lists variables of every workflow instance sharing a business key.
    pub async fn variables(
        &self,
        business_key: &str,
        business_key_type: &str,
    ) -> Result<Vec<Vec<Variable>>, ClientError> {
        self.get(
            "/api/v1/variables",
            &[
                ("businessKey", business_key),
                ("businessKeyType", business_key_type),
            ],
        )
        .await
    }

    /// Lists tasks of every workflow instance sharing a business key.
    pub async fn tasks(
        &self,
        business_key: &str,
        business_key_type: &str,
    ) -> Result<Vec<Vec<Task>>, ClientError> {
        self.get(
            "/api/v1/tasks",
            &[
                ("businessKey", business_key),
                ("businessKeyType", business_key_type),
            ],
        )
        .await
    }

    fn compensation(
        &self,
        path: &str,
        comment: Option<String>,
        operation: &'static str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let tenant = self
            .tenant_id
            .as_deref()
            .ok_or(ClientError::MissingTenant(operation))?;
        Ok(self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header(TENANT_HEADER, tenant)
            .json(&CompensationRequest { comment }))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(tenant) = &self.tenant_id {
            req = req.header(TENANT_HEADER, tenant);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(api_error(status.as_u16(), body))
        }
    }
}

/// Prefers the service's `{"response": ...}` message over the raw body.
fn api_error(status: u16, body: String) -> ClientError {
    let message = serde_json::from_str::<MessageResponse>(&body)
        .map(|m| m.response)
        .unwrap_or(body);
    ClientError::Api { status, message }
}
