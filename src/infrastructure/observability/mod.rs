use crate::config::Config;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

const DEFAULT_FILTER: &str = "notifold=debug,tower_http=debug";

pub const NOTIFICATIONS_AGGREGATED: &str = "notifications_aggregated_total";
pub const GROUPS_EMITTED: &str = "notification_groups_emitted_total";
pub const AGGREGATION_FAILURES: &str = "notification_aggregation_failures_total";

/// Flushes pending spans when dropped.
pub struct ObservabilityGuard;

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        shutdown();
    }
}

pub fn init(config: &Config) -> Result<ObservabilityGuard, Box<dyn std::error::Error>> {
    init_tracing(config)?;
    init_metrics(config)?;
    Ok(ObservabilityGuard)
}

fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    // Span export is only wired when a collector endpoint is configured
    if let Some(endpoint) = &config.otel_exporter_endpoint {
        let exporter = opentelemetry_otlp::new_exporter()
            .tonic()
            .with_endpoint(endpoint);

        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(exporter)
            .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                KeyValue::new("service.name", config.service_name.clone()),
            ])))
            .install_batch(runtime::Tokio)?;

        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .init();

        tracing::info!("Exporting spans to {}", endpoint);
    } else {
        Registry::default().with(env_filter).with(fmt_layer).init();
    }

    Ok(())
}

fn init_metrics(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], config.metrics_port))
        .install()?;
    describe_metrics();

    tracing::info!("Prometheus exporter listening on port {}", config.metrics_port);
    Ok(())
}

/// Register descriptions for the counters emitted by the grouping endpoint.
pub fn describe_metrics() {
    metrics::describe_counter!(
        NOTIFICATIONS_AGGREGATED,
        metrics::Unit::Count,
        "Raw notifications received for grouping"
    );
    metrics::describe_counter!(
        GROUPS_EMITTED,
        metrics::Unit::Count,
        "Grouped notifications produced by the aggregator"
    );
    metrics::describe_counter!(
        AGGREGATION_FAILURES,
        metrics::Unit::Count,
        "Batches rejected because a timestamp could not be parsed"
    );
}

pub fn shutdown() {
    global::shutdown_tracer_provider();
}
