//! Tenant extraction middleware.
//!
//! Every state-changing request must name the tenant it acts for in the
//! `Platform-TenantId` header. Reads pass through untouched.

use axum::{
    Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use operations_types::{MessageResponse, TENANT_HEADER};

/// Tenant a request acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantId(pub String);

impl TenantId {
    /// Reads a non-blank tenant from the request headers.
    pub fn from_request<B>(request: &Request<B>) -> Option<Self> {
        request
            .headers()
            .get(TENANT_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| TenantId(t.to_string()))
    }
}

pub async fn tenant_middleware(mut request: Request<Body>, next: Next) -> Response {
    match TenantId::from_request(&request) {
        Some(tenant) => {
            request.extensions_mut().insert(tenant);
        }
        None if !request.method().is_safe() => {
            tracing::warn!("{} {} rejected: missing tenant", request.method(), request.uri());
            return (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse::new(format!(
                    "Missing {} header",
                    TENANT_HEADER
                ))),
            )
                .into_response();
        }
        None => {}
    }

    next.run(request).await
}
