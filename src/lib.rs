//! Flaggate is an HTTP gateway for feature-flag and license endpoints.
//!
//! It exposes the workspace licensing surface of a SaaS product (license
//! initialization and activation, feature-flag retrieval, subscription
//! sync, workspace license and product lookups) and relays each request
//! to a backend monitor API. The gateway itself owns no business logic:
//! its job is route dispatch and uniform request observability.
//!
//! # Architecture
//!
//! - [`api`] -- Backend monitor API client: the [`MonitorApi`](api::MonitorApi)
//!   trait and its hyper-based HTTP implementation.
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, health).
//! - [`config`] -- Startup settings built from flags and environment,
//!   validated fail-fast before the router serves traffic.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`observer`] -- Per-request access logging: severity classification,
//!   newline sanitization, and the [`LogSink`](observer::LogSink) seam.
//! - [`routes`] -- The declarative route table and the sub-router mount
//!   that binds handler factories to the backend client.
//! - [`server`] -- Axum server setup, shared application state, HTTP client,
//!   and graceful shutdown.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod observer;
pub mod routes;
pub mod server;
