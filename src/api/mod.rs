//! Backend monitor API client.
//!
//! [`MonitorApi`] is the narrow seam between the gateway and the backend:
//! one async method per licensing operation, payloads and responses kept
//! as opaque JSON so the gateway stays decoupled from the backend's data
//! model. [`client`] holds the hyper-based production implementation.

pub mod client;

pub use client::HttpMonitorApi;

use async_trait::async_trait;
use serde_json::Value;

/// Upstream result relayed to the caller unchanged: the backend's status
/// code plus its JSON body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("backend request failed: {source}")]
    Transport {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("backend request timed out after {ms}ms")]
    Timeout { ms: u64 },

    #[error("invalid backend URI '{uri}'")]
    InvalidUri { uri: String },

    #[error("backend returned a non-JSON body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

/// Backend operations invoked by the route table's handler factories.
///
/// The auth key is passed on every call rather than held by the client,
/// matching how the handler factories receive it at wiring time.
#[async_trait]
pub trait MonitorApi: Send + Sync {
    /// Initialize a free workspace license.
    async fn initialize_workspace(&self, key: &str, payload: Value)
        -> Result<ApiResponse, ApiError>;

    /// Activate a purchased license / feature flag set.
    async fn activate_license(&self, key: &str, payload: Value) -> Result<ApiResponse, ApiError>;

    /// Fetch the feature flags for a workspace.
    async fn feature_flags(&self, key: &str, payload: Value) -> Result<ApiResponse, ApiError>;

    /// Re-sync a workspace subscription with the backend.
    async fn sync_subscription(
        &self,
        key: &str,
        workspace_id: &str,
        payload: Value,
    ) -> Result<ApiResponse, ApiError>;

    /// Look up the current license of a workspace.
    async fn workspace_license(&self, key: &str, workspace_id: &str)
        -> Result<ApiResponse, ApiError>;

    /// Look up the product (plan, seats) purchased for a workspace.
    async fn workspace_product(
        &self,
        key: &str,
        workspace_id: &str,
        payload: Value,
    ) -> Result<ApiResponse, ApiError>;
}
