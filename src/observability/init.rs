//! Subscriber setup wiring `tracing` into the file exporter.

use super::tracer;
use crate::domain::error::Result;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::{Path, PathBuf};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name attached to every exported span.
pub const SERVICE_NAME: &str = "trustboard";

/// File name of the trace output inside the data directory.
pub const TRACE_FILE_NAME: &str = "trustboard-otlp.json";

/// Level used when `trace_level` is not configured.
pub const DEFAULT_LEVEL: &str = "info";

/// Location of the trace file for a data directory.
#[must_use]
pub fn trace_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE_NAME)
}

/// Filter directive for the configured level.
#[must_use]
pub fn level_directive(config: &Config) -> &str {
    config
        .trace_level
        .as_deref()
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Installs the global subscriber exporting to the sandbox data directory.
///
/// Tracing is best effort: if the directory cannot be created or a
/// subscriber is already installed, the plugin runs without traces.
pub fn init_tracing(config: &Config) {
    let _ = try_init_tracing(config, &crate::infrastructure::get_data_dir());
}

/// Installs the global subscriber exporting into `data_dir`.
///
/// # Errors
///
/// Returns [`crate::DashboardError::Io`] if `data_dir` cannot be created.
pub fn try_init_tracing(config: &Config, data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(trace_file_path(data_dir), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let filter = EnvFilter::try_new(level_directive(config))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    // A second installation (plugin and worker share the process) is a no-op.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_defaults_to_info() {
        assert_eq!(level_directive(&Config::default()), "info");

        let config = Config {
            trace_level: Some("  ".to_string()),
            ..Config::default()
        };
        assert_eq!(level_directive(&config), "info");

        let config = Config {
            trace_level: Some("trustboard=debug".to_string()),
            ..Config::default()
        };
        assert_eq!(level_directive(&config), "trustboard=debug");
    }

    #[test]
    fn trace_file_lives_in_the_data_dir() {
        let path = trace_file_path(Path::new("/host/.local/share/zellij/trustboard"));
        assert_eq!(
            path,
            PathBuf::from("/host/.local/share/zellij/trustboard/trustboard-otlp.json")
        );
    }
}
