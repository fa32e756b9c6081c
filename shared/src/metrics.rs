use metrics_exporter_statsd::{StatsdBuilder, StatsdError};

#[derive(thiserror::Error, Debug)]
pub enum MetricsError {
    #[error("could not build statsd recorder: {0}")]
    Statsd(#[from] StatsdError),
    #[error("a metrics recorder is already installed")]
    AlreadyInstalled,
}

/// Install a global recorder that sends to StatsD.
///
/// Metrics emitted before this is called, or when it is never called, are
/// discarded by the `metrics` facade.
pub fn install_statsd(statsd_host: &str, statsd_port: u16, prefix: &str) -> Result<(), MetricsError> {
    let recorder = StatsdBuilder::from(statsd_host, statsd_port)
        .with_queue_size(5000)
        .with_buffer_size(1024)
        .build(Some(prefix))?;

    metrics::set_global_recorder(recorder).map_err(|_| MetricsError::AlreadyInstalled)?;

    tracing::info!(host = statsd_host, port = statsd_port, "statsd metrics enabled");
    Ok(())
}
