//! Process-wide logging setup.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once at
//! startup. When a Sentry DSN is given, error events are also forwarded to
//! Sentry through its tracing layer.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(thiserror::Error, Debug)]
pub enum LoggingError {
    #[error("could not install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps the Sentry client alive. Events are flushed when this is dropped.
pub struct LoggingGuard {
    _sentry: Option<sentry::ClientInitGuard>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_level` when set.
pub fn init(default_level: &str, sentry_dsn: Option<&str>) -> Result<LoggingGuard, LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let sentry_guard = sentry_dsn.map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });
    let sentry_layer = sentry_guard
        .as_ref()
        .map(|_| sentry::integrations::tracing::layer());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(sentry_layer)
        .try_init()?;

    Ok(LoggingGuard {
        _sentry: sentry_guard,
    })
}
