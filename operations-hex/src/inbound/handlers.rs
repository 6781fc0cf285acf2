//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use operations_types::{
    AppError, BusinessKeyQuery, ChannelResponse, MessageResponse, OperationsRepository,
    WorkflowInstanceKey,
};

use super::tenant::TenantId;
use crate::OperationsService;

/// Body returned by a successfully started recall.
pub const RECALL_ACCEPTED: &str = "OK";

/// Application state shared across handlers.
pub struct AppState<R: OperationsRepository> {
    pub service: OperationsService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamUnavailable(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamRejected { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self.0);
        }
        (status, Json(MessageResponse::new(self.0.message()))).into_response()
    }
}

/// Relays the channel connector's answer as-is.
struct Relayed(ChannelResponse);

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::BAD_GATEWAY);
        let mut response = (status, self.0.body).into_response();
        match self
            .0
            .content_type
            .as_deref()
            .map(HeaderValue::from_str)
        {
            Some(Ok(value)) => {
                response.headers_mut().insert(CONTENT_TYPE, value);
            }
            _ => {
                response.headers_mut().remove(CONTENT_TYPE);
            }
        }
        response
    }
}

fn parse_instance_key(raw: &str) -> Result<WorkflowInstanceKey, ApiError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid workflow instance key: {}", raw)).into())
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Compensations
// ─────────────────────────────────────────────────────────────────────────────

/// Refund a completed incoming transfer.
#[tracing::instrument(skip(state, tenant, body), fields(tenant = %tenant.0, transaction_id = %id))]
pub async fn refund_transfer<R: OperationsRepository>(
    State(state): State<Arc<AppState<R>>>,
    Extension(tenant): Extension<TenantId>,
    Path(id): Path<String>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let response = state.service.refund(&tenant.0, &id, &body).await?;
    Ok(Relayed(response))
}

/// Recall a completed incoming transfer.
#[tracing::instrument(skip(state, tenant, body), fields(tenant = %tenant.0, transaction_id = %id))]
pub async fn recall_transfer<R: OperationsRepository>(
    State(state): State<Arc<AppState<R>>>,
    Extension(tenant): Extension<TenantId>,
    Path(id): Path<String>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    state.service.recall(&tenant.0, &id, &body).await?;
    Ok((StatusCode::OK, RECALL_ACCEPTED))
}

// ─────────────────────────────────────────────────────────────────────────────
// Read views
// ─────────────────────────────────────────────────────────────────────────────

/// Transfer executed by a workflow instance.
#[tracing::instrument(skip(state), fields(workflow_instance_key = %id))]
pub async fn transfer_details<R: OperationsRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let key = parse_instance_key(&id)?;
    let detail = state.service.transfer_detail(key).await?;
    Ok(Json(detail))
}

/// Transaction request executed by a workflow instance.
#[tracing::instrument(skip(state), fields(workflow_instance_key = %id))]
pub async fn transaction_request_details<R: OperationsRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let key = parse_instance_key(&id)?;
    let detail = state.service.transaction_request_detail(key).await?;
    Ok(Json(detail))
}

#[tracing::instrument(skip(state))]
pub async fn variables<R: OperationsRepository>(
    State(state): State<Arc<AppState<R>>>,
    Query(query): Query<BusinessKeyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let variables = state
        .service
        .variables_by_business_key(&query.business_key, &query.business_key_type)
        .await?;
    Ok(Json(variables))
}

#[tracing::instrument(skip(state))]
pub async fn tasks<R: OperationsRepository>(
    State(state): State<Arc<AppState<R>>>,
    Query(query): Query<BusinessKeyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = state
        .service
        .tasks_by_business_key(&query.business_key, &query.business_key_type)
        .await?;
    Ok(Json(tasks))
}
