//! # Operations Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the Transfer Store adapter
//! - Build the channel connector and workflow engine clients
//! - Create the operations service
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use operations_hex::outbound::{HttpChannelConnector, HttpWorkflowTrigger};
use operations_hex::{OperationsService, inbound::HttpServer};
use operations_repo::build_repo;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("operations-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (otel_tracer, otel_provider) = init_tracer()?;
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,operations_app=debug,operations_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting operations server on port {}", config.port);
    tracing::info!("Channel connector: {}", config.channel_connector_url);
    tracing::info!("Workflow engine: {}", config.workflow_engine_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url, config.database_acquire_timeout).await?;

    let channel = HttpChannelConnector::new(
        &config.channel_connector_url,
        &config.channel_connector_transfer_path,
        config.upstream_timeout,
    )?;
    let workflow = HttpWorkflowTrigger::new(
        &config.workflow_engine_url,
        &config.workflow_start_path,
        config.upstream_timeout,
    )?;

    // Create the operations service
    let service = OperationsService::new(
        repo,
        Arc::new(channel),
        Arc::new(workflow),
        config.recall_processes.clone(),
    );

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(service, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    let _ = otel_provider.shutdown();
    Ok(())
}
