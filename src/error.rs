//! Unified error types for Flaggate.
//!
//! Defines [`GatewayError`], the main crate error enum, using `thiserror`
//! for `Display` and `Error` derives. Configuration errors carry
//! contextual hints to guide the user toward a fix; all of them abort
//! startup before the router serves traffic.

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("No backend API URL configured.\n\n  {hint}")]
    MissingApiUrl { hint: String },

    #[error("No backend API key configured.\n\n  {hint}")]
    MissingApiKey { hint: String },

    #[error("Invalid backend API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("Invalid mount prefix '{0}' (must start with '/')")]
    InvalidPrefix(String),

    #[error("Duplicate route binding: {method} {path}")]
    DuplicateRoute { method: http::Method, path: String },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}
