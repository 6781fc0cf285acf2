//! Shared setup for the HTTP integration tests.
#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use chrono::{DateTime, Utc};
use wiremock::MockServer;

use operations_hex::inbound::HttpServer;
use operations_hex::outbound::{HttpChannelConnector, HttpWorkflowTrigger};
use operations_hex::{OperationsService, RecallProcesses};
use operations_repo::SqliteRepo;
use operations_types::{Transfer, TransferDirection, TransferStatus, Variable};

pub const TENANT: &str = "rhino";
pub const KEY: i64 = 2251799813685249;

/// Mock channel connector and workflow engine backing one test server.
pub struct Upstreams {
    pub channel: MockServer,
    pub workflow: MockServer,
}

impl Upstreams {
    pub async fn start() -> Self {
        Self {
            channel: MockServer::start().await,
            workflow: MockServer::start().await,
        }
    }
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
        + chrono::Duration::seconds(seconds)
}

pub fn transfer(direction: TransferDirection, status: TransferStatus) -> Transfer {
    Transfer {
        transaction_id: "txn-1".to_string(),
        workflow_instance_key: KEY,
        direction,
        status,
        payer_party_id: "DE89370400440532013000".to_string(),
        payer_party_id_type: "IBAN".to_string(),
        payee_party_id: "4915112345678".to_string(),
        payee_party_id_type: "MSISDN".to_string(),
        amount: "10.50".parse().unwrap(),
        currency: "EUR".to_string(),
        started_at: at(0),
        completed_at: Some(at(3)),
    }
}

pub async fn seed_variable(repo: &SqliteRepo, name: &str, value: &str, seconds: i64) {
    repo.insert_variable(&Variable {
        workflow_instance_key: KEY,
        name: name.to_string(),
        value: value.to_string(),
        timestamp: at(seconds),
    })
    .await
    .unwrap();
}

pub async fn repo() -> SqliteRepo {
    SqliteRepo::new("sqlite::memory:").await.unwrap()
}

pub fn server(
    repo: SqliteRepo,
    upstreams: &Upstreams,
    requests_per_minute: u32,
) -> HttpServer<SqliteRepo> {
    let timeout = Duration::from_secs(2);
    let channel =
        HttpChannelConnector::new(&upstreams.channel.uri(), "/channel/transfer", timeout).unwrap();
    let workflow =
        HttpWorkflowTrigger::new(&upstreams.workflow.uri(), "/v2/process-instances", timeout)
            .unwrap();
    let service = OperationsService::new(
        repo,
        std::sync::Arc::new(channel),
        std::sync::Arc::new(workflow),
        RecallProcesses::default(),
    );
    HttpServer::with_rate_limit(service, requests_per_minute)
}

pub fn post(uri: &str, tenant: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(tenant) = tenant {
        builder = builder.header("Platform-TenantId", tenant);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
