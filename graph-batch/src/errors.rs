use thiserror::Error;

/// Result type alias for graph-batch operations
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Errors returned to the caller of a profile request.
///
/// Only fatal conditions are represented here. Failures of individual
/// sub-requests inside a batch never surface as a `GraphError`; they are
/// recorded as diagnostics on the returned profile.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("access token is empty")]
    EmptyToken,

    #[error("query definition not found: {0}")]
    CatalogKeyNotFound(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("batch response is not a JSON array: {0}")]
    MalformedBatch(#[source] serde_json::Error),

    #[error("could not serialize batch template: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Failures of the outbound HTTP call.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("request to {0} timed out")]
    Timeout(String),

    #[error("request failed: {0}")]
    RequestFailed(String),
}

/// A sub-response body that could not be decoded into its entity schema.
#[derive(Error, Debug)]
#[error("could not decode {entity}: {source}")]
pub struct DecodeError {
    pub entity: &'static str,
    #[source]
    pub source: serde_json::Error,
}
