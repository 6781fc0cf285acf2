//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use operations_types::domain::{
    BusinessKey, Task, TransactionRequest, Transfer, TransferDirection, TransferStatus, Variable,
};
use operations_types::dto::{
    BusinessKeyQuery, CompensationRequest, MessageResponse, TransactionRequestDetail,
    TransferDetail,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Refund a completed incoming transfer
///
/// Sends the amount back to the original payer through the channel
/// connector and relays the connector's answer unchanged.
#[utoipa::path(
    post,
    path = "/api/v1/transfer/{id}/refund",
    tag = "compensation",
    request_body = CompensationRequest,
    params(
        ("id" = String, Path, description = "Transaction id of the incoming transfer"),
        ("Platform-TenantId" = String, Header, description = "Tenant the refund is made for")
    ),
    responses(
        (status = 200, description = "Channel connector answer, relayed as-is"),
        (status = 400, description = "Missing tenant header", body = MessageResponse),
        (status = 404, description = "No completed incoming transfer with this id", body = MessageResponse),
        (status = 504, description = "Channel connector unreachable", body = MessageResponse)
    )
)]
async fn refund_transfer() {}

/// Recall a completed incoming transfer
#[utoipa::path(
    post,
    path = "/api/v1/transfer/{id}/recall",
    tag = "compensation",
    request_body = CompensationRequest,
    params(
        ("id" = String, Path, description = "Transaction id of the incoming transfer"),
        ("Platform-TenantId" = String, Header, description = "Tenant the recall is made for")
    ),
    responses(
        (status = 200, description = "Recall workflow started", body = String, example = "OK"),
        (status = 400, description = "Missing tenant header", body = MessageResponse),
        (status = 404, description = "No completed incoming transfer with this id", body = MessageResponse),
        (status = 502, description = "Workflow engine refused the process", body = MessageResponse),
        (status = 504, description = "Workflow engine unreachable", body = MessageResponse)
    )
)]
async fn recall_transfer() {}

/// Transfer executed by a workflow instance
#[utoipa::path(
    get,
    path = "/api/v1/transfer/{id}",
    tag = "operations",
    params(
        ("id" = i64, Path, description = "Workflow instance key")
    ),
    responses(
        (status = 200, description = "Transfer with tasks and variables", body = TransferDetail),
        (status = 400, description = "Key is not an integer", body = MessageResponse),
        (status = 404, description = "No transfer for this workflow instance", body = MessageResponse)
    )
)]
async fn transfer_details() {}

/// Transaction request executed by a workflow instance
#[utoipa::path(
    get,
    path = "/api/v1/transactionRequest/{id}",
    tag = "operations",
    params(
        ("id" = i64, Path, description = "Workflow instance key")
    ),
    responses(
        (status = 200, description = "Transaction request with tasks and variables", body = TransactionRequestDetail),
        (status = 400, description = "Key is not an integer", body = MessageResponse),
        (status = 404, description = "No transaction request for this workflow instance", body = MessageResponse)
    )
)]
async fn transaction_request_details() {}

/// Variables of every workflow instance sharing a business key
#[utoipa::path(
    get,
    path = "/api/v1/variables",
    tag = "operations",
    params(BusinessKeyQuery),
    responses(
        (status = 200, description = "One variable list per correlated instance", body = Vec<Vec<Variable>>)
    )
)]
async fn variables() {}

/// Tasks of every workflow instance sharing a business key
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    tag = "operations",
    params(BusinessKeyQuery),
    responses(
        (status = 200, description = "One task list per correlated instance", body = Vec<Vec<Task>>)
    )
)]
async fn tasks() {}

/// OpenAPI documentation for the Operations API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payment Hub Operations API",
        version = "1.0.0",
        description = "Operator-facing API of the payment hub: refund and recall compensations for completed incoming transfers, and read views over the workflow execution trace.\n\nState-changing requests must carry the tenant in the `Platform-TenantId` header.",
        license(name = "MIT"),
    ),
    paths(
        health,
        refund_transfer,
        recall_transfer,
        transfer_details,
        transaction_request_details,
        variables,
        tasks,
    ),
    components(
        schemas(
            CompensationRequest,
            MessageResponse,
            Transfer,
            TransferDirection,
            TransferStatus,
            TransactionRequest,
            Task,
            Variable,
            BusinessKey,
            TransferDetail,
            TransactionRequestDetail,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "compensation", description = "Refund and recall of incoming transfers"),
        (name = "operations", description = "Read views over transfers, tasks and variables"),
    )
)]
pub struct ApiDoc;
