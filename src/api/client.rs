//! Hyper-based implementation of [`MonitorApi`].
//!
//! Speaks JSON to the backend monitor API over the shared
//! connection-pooled client from [`server::build_http_client`]. Every
//! request carries the auth key in an `x-api-key` header. Upstream
//! status codes are relayed as-is; transport failures and timeouts map
//! to [`ApiError`] variants for the handlers to translate.

use std::time::Duration;

use async_trait::async_trait;
use http_body_util::BodyExt;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::Method;
use serde_json::Value;
use url::Url;

use super::{ApiError, ApiResponse, MonitorApi};
use crate::server::{self, HttpClient};

pub struct HttpMonitorApi {
    client: HttpClient,
    base: String,
    timeout: Duration,
}

impl HttpMonitorApi {
    #[must_use]
    pub fn new(base: &Url, timeout_ms: u64) -> Self {
        Self {
            client: server::build_http_client(),
            base: base.as_str().trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        key: &str,
        payload: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{path}", self.base);
        let uri: hyper::Uri = url.parse().map_err(|_| ApiError::InvalidUri { uri: url })?;

        let body = match payload {
            Some(value) => serde_json::to_vec(value).map_err(|e| ApiError::Transport {
                source: Box::new(e),
            })?,
            None => Vec::new(),
        };

        let request = hyper::Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header("x-api-key", key)
            .body(http_body_util::Full::new(bytes::Bytes::from(body)))
            .map_err(|e| ApiError::Transport {
                source: Box::new(e),
            })?;

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| ApiError::Timeout {
                ms: self.timeout.as_millis() as u64,
            })?
            .map_err(|e| ApiError::Transport {
                source: Box::new(e),
            })?;

        let status = response.status().as_u16();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ApiError::Transport {
                source: Box::new(e),
            })?
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode { source: e })?
        };

        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl MonitorApi for HttpMonitorApi {
    async fn initialize_workspace(
        &self,
        key: &str,
        payload: Value,
    ) -> Result<ApiResponse, ApiError> {
        self.request(Method::POST, "/api/licenses/initialize/", key, Some(&payload))
            .await
    }

    async fn activate_license(&self, key: &str, payload: Value) -> Result<ApiResponse, ApiError> {
        self.request(Method::POST, "/api/licenses/activate/", key, Some(&payload))
            .await
    }

    async fn feature_flags(&self, key: &str, payload: Value) -> Result<ApiResponse, ApiError> {
        self.request(Method::POST, "/api/feature-flags/", key, Some(&payload))
            .await
    }

    async fn sync_subscription(
        &self,
        key: &str,
        workspace_id: &str,
        payload: Value,
    ) -> Result<ApiResponse, ApiError> {
        let path = format!("/api/workspaces/{workspace_id}/subscriptions/");
        self.request(Method::PATCH, &path, key, Some(&payload)).await
    }

    async fn workspace_license(
        &self,
        key: &str,
        workspace_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        let path = format!("/api/workspaces/{workspace_id}/licenses/");
        self.request(Method::GET, &path, key, None).await
    }

    async fn workspace_product(
        &self,
        key: &str,
        workspace_id: &str,
        payload: Value,
    ) -> Result<ApiResponse, ApiError> {
        let path = format!("/api/products/workspace-products/{workspace_id}/");
        self.request(Method::POST, &path, key, Some(&payload)).await
    }
}
