//! Logging, optional OpenTelemetry export, and per-request query counting.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};
use std::time::Duration;
use tracing::{span::Id, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::Context, registry::LookupSpan, Layer};

/// Sent as `X-DB-Query-Count`; header names are case-insensitive.
pub const QUERY_COUNT_HEADER: &str = "x-db-query-count";

const DEFAULT_SERVICE_NAME: &str = "recipe-server";

/// Initialize console logging, plus OTLP export of traces and logs when
/// `OTEL_EXPORTER_OTLP_ENDPOINT` is set and the collector answers.
pub fn init_telemetry() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(DbQueryCountingLayer);

    let Some(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok() else {
        registry.init();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return Ok(());
    };

    if !is_reachable(&endpoint) {
        registry.init();
        tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        );
        return Ok(());
    }

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.clone())
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()?;

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let tracer = trace_provider.tracer(DEFAULT_SERVICE_NAME);
    opentelemetry::global::set_tracer_provider(trace_provider);

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()?;

    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    registry
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(OpenTelemetryTracingBridge::new(&log_provider))
        .init();

    tracing::info!(
        "OpenTelemetry enabled, exporting traces and logs to {} as {}",
        endpoint,
        service_name
    );

    Ok(())
}

/// Quick TCP check so an absent collector doesn't stall exports.
fn is_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://");

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

tokio::task_local! {
    /// Database queries issued by the current request.
    static DB_QUERY_COUNTER: Arc<AtomicU32>;
}

/// Database query count for the current request, if a counter is in scope.
pub fn get_query_count() -> Option<u32> {
    DB_QUERY_COUNTER
        .try_with(|counter| counter.load(Ordering::Relaxed))
        .ok()
}

/// Counts `db.query` spans against the task-local counter of the request that
/// opened them. Store queries run synchronously inside the handler's task, so
/// the task-local is always the right one.
pub struct DbQueryCountingLayer;

impl<S> Layer<S> for DbQueryCountingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, _attrs: &tracing::span::Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };

        if span.name() == "db.query" {
            let _ = DB_QUERY_COUNTER.try_with(|counter| {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
    }
}

/// Put a fresh query counter in scope for the request.
///
/// Must be layered outside the TraceLayer and the header middleware.
pub async fn query_counting_middleware(request: Request<Body>, next: Next) -> Response {
    let counter = Arc::new(AtomicU32::new(0));
    DB_QUERY_COUNTER.scope(counter, next.run(request)).await
}

/// Add the `X-DB-Query-Count` header when tracking is enabled.
pub async fn db_query_count_header_middleware(
    State(enabled): State<bool>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    if enabled {
        if let Some(count) = get_query_count() {
            response
                .headers_mut()
                .insert(QUERY_COUNT_HEADER, HeaderValue::from(count));
        }
    }

    response
}
