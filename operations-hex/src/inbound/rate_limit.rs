//! Rate limiting middleware using Governor.
//!
//! Implements per-tenant rate limiting with a token bucket algorithm.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde_json::json;
use std::{num::NonZeroU32, sync::Arc};

use super::tenant::TenantId;

/// Bucket shared by requests that name no tenant.
const ANONYMOUS: &str = "anonymous";

/// Seconds a throttled caller is told to wait.
pub const RETRY_AFTER_SECONDS: u64 = 60;

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// Per-tenant rate limiters
    limiters: DashMap<String, Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>>,
    /// Quota for new tenants
    quota: Quota,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::per_minute(100)
    }
}

impl RateLimiterState {
    /// Allows `requests` per minute per tenant, all of them available as a burst.
    ///
    /// A zero quota is raised to one request per minute.
    pub fn per_minute(requests: u32) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN));

        Self {
            limiters: DashMap::new(),
            quota,
        }
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, key: &str) -> bool {
        let limiter = self
            .limiters
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(RateLimiter::direct(self.quota)));

        limiter.check().is_ok()
    }
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip rate limiting for health endpoint
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let key = TenantId::from_request(&request)
        .map(|t| t.0)
        .unwrap_or_else(|| ANONYMOUS.to_string());

    if !limiter.check(&key) {
        tracing::warn!("Rate limit exceeded for tenant {}", key);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "response": "Rate limit exceeded. Please try again later.",
                "retryAfterSeconds": RETRY_AFTER_SECONDS
            })),
        )
            .into_response();
    }

    next.run(request).await
}
