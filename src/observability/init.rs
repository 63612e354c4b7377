//! Subscriber setup: `EnvFilter` plus an OpenTelemetry layer exporting to file.

use super::tracer;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name on every exported span.
pub const SERVICE_NAME: &str = "Parley";

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "parley-otlp.json";

/// Where spans are written.
#[must_use]
pub fn trace_file_path() -> PathBuf {
    paths::data_dir().join(TRACE_FILE)
}

/// Installs the global tracing subscriber.
///
/// The filter comes from `config.trace_level` (an `EnvFilter` directive such
/// as `"debug"` or `"parley::pipeline=trace"`). Returns `false` when the data
/// directory cannot be created or a subscriber is already installed; tracing
/// is optional and the plugin keeps running either way.
pub fn init_tracing(config: &Config) -> bool {
    let data_dir = paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::file_tracer_provider(trace_file_path(), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(&config.trace_level))
        .with(otel_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = %config.trace_level, file = %trace_file_path().display(), "tracing initialized");
    }
    installed
}
