//! Structured telemetry initialisation for the CLI.

use std::io::{self, IsTerminal};

use hostap_config::{LogFormat, Settings};
use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber on first use.
///
/// Later calls return immediately without touching the global state.
pub(crate) fn initialise(settings: &Settings) -> Result<(), TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(settings))
        .map(|_| ())
}

fn install_subscriber(settings: &Settings) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(settings.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;

    let builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_timer(fmt::time::UtcTime::rfc_3339())
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> = match settings.log_format() {
        LogFormat::Json => Box::new(builder(filter).json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder(filter).compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}
