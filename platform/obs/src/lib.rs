//! Tracing setup for the dashboard binary: fmt logging plus an optional OTLP span exporter.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{self as sdk, Resource};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,tower_http=warn";

static PROVIDER: OnceCell<Option<sdk::trace::SdkTracerProvider>> = OnceCell::new();

#[derive(Clone, Debug)]
pub struct ObsConfig {
    pub service_name: &'static str,
    pub env_filter: Option<String>,
    pub otlp_endpoint: Option<String>,
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            service_name: "hr-dashboard",
            env_filter: None,
            otlp_endpoint: None,
        }
    }
}

impl ObsConfig {
    /// Fill unset fields from `RUST_LOG` and `OTLP_ENDPOINT`.
    pub fn from_env(service_name: &'static str) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(service_name: &'static str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            service_name,
            env_filter: non_empty("RUST_LOG"),
            otlp_endpoint: non_empty("OTLP_ENDPOINT"),
        }
    }

    pub fn filter_directives(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(DEFAULT_FILTER)
    }
}

/// Install the global subscriber once; later calls are no-ops.
pub fn init_tracing(config: ObsConfig) -> Result<()> {
    PROVIDER
        .get_or_try_init(|| install(&config))
        .map(|_| ())
}

fn install(config: &ObsConfig) -> Result<Option<sdk::trace::SdkTracerProvider>> {
    let env_filter = EnvFilter::try_new(config.filter_directives())
        .with_context(|| format!("invalid log filter `{}`", config.filter_directives()))?;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    let Some(endpoint) = config.otlp_endpoint.clone() else {
        registry.try_init()?;
        return Ok(None);
    };

    let exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(endpoint)
        .build()
        .context("failed to build OTLP span exporter")?;
    let resource = Resource::builder()
        .with_service_name(config.service_name)
        .build();
    let provider = sdk::trace::SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build();
    let tracer = provider.tracer(config.service_name);

    registry
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .try_init()?;
    Ok(Some(provider))
}

/// Flush buffered spans before exit.
pub fn shutdown_tracing() {
    if let Some(Some(provider)) = PROVIDER.get() {
        if let Err(err) = provider.shutdown() {
            tracing::warn!(error = %err, "failed to flush OTLP spans");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_env_values_fall_back_to_defaults() {
        let config = ObsConfig::from_lookup("svc", |key| match key {
            "RUST_LOG" => Some("  ".into()),
            _ => None,
        });
        assert_eq!(config.filter_directives(), DEFAULT_FILTER);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn env_values_are_picked_up() {
        let config = ObsConfig::from_lookup("svc", |key| match key {
            "RUST_LOG" => Some("debug".into()),
            "OTLP_ENDPOINT" => Some("http://collector:4318/v1/traces".into()),
            _ => None,
        });
        assert_eq!(config.service_name, "svc");
        assert_eq!(config.filter_directives(), "debug");
        assert_eq!(
            config.otlp_endpoint.as_deref(),
            Some("http://collector:4318/v1/traces")
        );
    }
}
