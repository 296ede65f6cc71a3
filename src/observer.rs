//! Per-request access logging for the gateway mount.
//!
//! Every request passing through the sub-router produces exactly one
//! access-log emission. A status code of 200 is classified [`Severity::Info`];
//! anything else (3xx, 4xx, 5xx alike) is [`Severity::Error`] — a deliberate
//! binary classifier, not a status-code taxonomy. The formatted line is
//! stripped of newline characters before emission so user-controlled path
//! values cannot forge extra log lines, and is prefixed with
//! [`HTTP_ROUTER_PREFIX`].
//!
//! The [`LogSink`] trait is the seam toward the embedding application;
//! production uses [`TracingSink`]. Sink writes are infallible by
//! signature: a failing or slow sink must swallow its own trouble and
//! never reach the HTTP response path.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

/// Fixed prefix identifying this subsystem in shared log output.
pub const HTTP_ROUTER_PREFIX: &str = "[HTTP ROUTER] ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Destination for access-log lines. Implementations must tolerate
/// concurrent writers and must not return errors to the caller.
pub trait LogSink: Send + Sync {
    fn write(&self, severity: Severity, message: &str);
}

/// Production sink backed by the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }
    }
}

/// Exactly 200 is a success; everything else gets error severity so any
/// non-exact-success is alertable.
#[must_use]
pub const fn classify(status: u16) -> Severity {
    if status == 200 {
        Severity::Info
    } else {
        Severity::Error
    }
}

/// Strip newline characters from a log line before it reaches the sink.
#[must_use]
pub fn sanitize_line(line: &str) -> String {
    line.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// One sink write per completed request: sanitized line, fixed prefix,
/// severity derived from the status code.
pub fn emit(sink: &dyn LogSink, status: u16, line: &str) {
    let message = format!("{HTTP_ROUTER_PREFIX}{}", sanitize_line(line));
    sink.write(classify(status), &message);
}

/// Axum middleware wrapping every route on the gateway mount.
///
/// Attached once to the sub-router, so a new route added to the table
/// inherits logging without extra wiring. The emission strictly follows
/// response completion and never alters status or body.
pub async fn access_log(
    State(sink): State<Arc<dyn LogSink>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let line = format!(
        "{status} | {}ms | {method} {path}",
        start.elapsed().as_millis()
    );
    emit(sink.as_ref(), status, &line);

    response
}
