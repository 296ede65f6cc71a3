//! Integration tests for the access-log observer on the gateway mount.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use flaggate::api::{ApiError, ApiResponse, MonitorApi};
use flaggate::observer::{LogSink, Severity, HTTP_ROUTER_PREFIX};
use flaggate::routes;

/// Backend double that answers every operation with a fixed status.
struct StaticApi {
    status: u16,
}

impl StaticApi {
    fn respond(&self) -> Result<ApiResponse, ApiError> {
        Ok(ApiResponse {
            status: self.status,
            body: json!({ "ok": self.status == 200 }),
        })
    }
}

#[async_trait]
impl MonitorApi for StaticApi {
    async fn initialize_workspace(
        &self,
        _key: &str,
        _payload: Value,
    ) -> Result<ApiResponse, ApiError> {
        self.respond()
    }

    async fn activate_license(&self, _key: &str, _payload: Value) -> Result<ApiResponse, ApiError> {
        self.respond()
    }

    async fn feature_flags(&self, _key: &str, _payload: Value) -> Result<ApiResponse, ApiError> {
        self.respond()
    }

    async fn sync_subscription(
        &self,
        _key: &str,
        _workspace_id: &str,
        _payload: Value,
    ) -> Result<ApiResponse, ApiError> {
        self.respond()
    }

    async fn workspace_license(
        &self,
        _key: &str,
        _workspace_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.respond()
    }

    async fn workspace_product(
        &self,
        _key: &str,
        _workspace_id: &str,
        _payload: Value,
    ) -> Result<ApiResponse, ApiError> {
        self.respond()
    }
}

#[derive(Default)]
struct CaptureSink {
    lines: Mutex<Vec<(Severity, String)>>,
}

impl CaptureSink {
    fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for CaptureSink {
    fn write(&self, severity: Severity, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

async fn start_gateway(
    upstream_status: u16,
) -> (
    SocketAddr,
    Arc<CaptureSink>,
    tokio::sync::oneshot::Sender<()>,
) {
    let sink = Arc::new(CaptureSink::default());
    let api = Arc::new(StaticApi {
        status: upstream_status,
    });
    let router = routes::mount(api, Arc::from("test-key"), sink.clone()).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, sink, shutdown_tx)
}

#[tokio::test]
async fn success_emits_exactly_one_info_line() {
    let (addr, sink, shutdown) = start_gateway(200).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/licenses/initialize/"))
        .json(&json!({ "machine_signature": "sig-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, Severity::Info);
    assert!(lines[0].1.starts_with(HTTP_ROUTER_PREFIX));
    assert!(!lines[0].1.contains('\n'));
    assert!(lines[0].1.contains("POST /licenses/initialize/"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn upstream_error_emits_exactly_one_error_line() {
    let (addr, sink, shutdown) = start_gateway(500).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/feature-flags/"))
        .json(&json!({ "workspace_slug": "acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, Severity::Error);
    assert!(lines[0].1.starts_with(HTTP_ROUTER_PREFIX));
    assert!(!lines[0].1.contains('\n'));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn invalid_body_is_classified_as_error() {
    let (addr, sink, shutdown) = start_gateway(200).await;

    // Malformed JSON is rejected by the extractor before the backend is
    // reached; whatever 4xx results must still be logged at Error.
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/licenses/activate/"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, Severity::Error);
    assert!(lines[0].1.starts_with(HTTP_ROUTER_PREFIX));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn non_exact_success_statuses_are_errors_too() {
    // 201 is a success by HTTP taxonomy but not an exact 200; the
    // classifier is deliberately binary.
    let (addr, sink, shutdown) = start_gateway(201).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/feature-flags/"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(sink.lines()[0].0, Severity::Error);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn empty_path_parameter_does_not_crash_the_observer() {
    let (addr, sink, shutdown) = start_gateway(200).await;

    // "/workspaces//subscriptions/" is a host routing concern; whatever
    // status comes back, the observer still emits exactly once.
    let resp = reqwest::Client::new()
        .patch(format!("http://{addr}/workspaces//subscriptions/"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    let expected = if status == 200 {
        Severity::Info
    } else {
        Severity::Error
    };
    assert_eq!(lines[0].0, expected);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn concurrent_requests_each_emit_exactly_once() {
    let (addr, sink, shutdown) = start_gateway(200).await;

    let client = reqwest::Client::new();
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..100 {
        let client = client.clone();
        let url = format!("http://{addr}/feature-flags/");
        tasks.spawn(async move {
            client
                .post(url)
                .json(&json!({ "workspace_slug": "acme" }))
                .send()
                .await
                .unwrap()
                .status()
        });
    }
    while let Some(status) = tasks.join_next().await {
        assert_eq!(status.unwrap(), 200);
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), 100);
    for (severity, line) in &lines {
        assert_eq!(*severity, Severity::Info);
        assert!(line.starts_with(HTTP_ROUTER_PREFIX), "corrupted line: {line}");
        assert!(line.contains("POST /feature-flags/"), "corrupted line: {line}");
        assert!(!line.contains('\n'));
    }

    let _ = shutdown.send(());
}
