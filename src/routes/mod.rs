//! The declarative route table and the sub-router mount.
//!
//! [`feature_flag_bindings`] is the fixed set of `(method, path)` →
//! handler-factory bindings the gateway exposes. [`mount_bindings`]
//! registers a table onto a fresh sub-router, rejecting duplicate
//! `(method, path)` pairs at startup, and attaches the access-log
//! observer so every binding inherits logging without extra wiring.
//! The resulting router is immutable: no dynamic registration, no
//! ambient global registry — the caller merges or nests it into the
//! parent router explicitly.

pub mod handlers;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::Method;
use axum::middleware;
use axum::routing::MethodRouter;
use axum::Router;

use crate::api::MonitorApi;
use crate::error::GatewayError;
use crate::observer::{self, LogSink};

/// Shared backend client capability, passed through to every handler
/// factory unchanged.
pub type ApiHandle = Arc<dyn MonitorApi>;

/// Opaque auth key shared read-only across all handler factories.
pub type AuthKey = Arc<str>;

/// Invoked once at registration time; the returned handler is bound for
/// the lifetime of the mount.
pub type HandlerFactory = fn(ApiHandle, AuthKey) -> MethodRouter;

pub struct RouteBinding {
    pub method: Method,
    pub path: &'static str,
    pub factory: HandlerFactory,
}

/// The feature-flag and license route table, grouped by feature area.
///
/// `POST /subscriptions/check/` is a reserved stub: the backend contract
/// (`{ workspace_id }` in, boolean out) is not finalized yet, so the
/// binding answers 501 until it is.
#[must_use]
pub fn feature_flag_bindings() -> Vec<RouteBinding> {
    vec![
        // Provisioning
        RouteBinding {
            method: Method::POST,
            path: "/licenses/initialize/",
            factory: handlers::initialize_free_workspace,
        },
        // Activation
        RouteBinding {
            method: Method::POST,
            path: "/licenses/activate/",
            factory: handlers::activate_license,
        },
        // Flag evaluation
        RouteBinding {
            method: Method::POST,
            path: "/feature-flags/",
            factory: handlers::get_feature_flags,
        },
        // Subscription sync
        RouteBinding {
            method: Method::PATCH,
            path: "/workspaces/{workspace_id}/subscriptions/",
            factory: handlers::sync_workspace_subscription,
        },
        // License lookup
        RouteBinding {
            method: Method::GET,
            path: "/workspaces/{workspace_id}/licenses/",
            factory: handlers::get_workspace_license,
        },
        // Product lookup
        RouteBinding {
            method: Method::POST,
            path: "/products/workspace-products/{workspace_id}/",
            factory: handlers::get_workspace_product,
        },
        RouteBinding {
            method: Method::POST,
            path: "/subscriptions/check/",
            factory: handlers::check_subscription,
        },
    ]
}

/// Register a route table onto a fresh sub-router and attach the
/// access-log observer around all of it.
///
/// Duplicate `(method, path)` pairs are a startup-time configuration
/// error: the mount never enters the serving phase with an ambiguous
/// table.
pub fn mount_bindings(
    bindings: &[RouteBinding],
    api: ApiHandle,
    key: AuthKey,
    sink: Arc<dyn LogSink>,
) -> Result<Router, GatewayError> {
    let mut seen = HashSet::new();
    let mut router = Router::new();

    for binding in bindings {
        if !seen.insert((binding.method.clone(), binding.path)) {
            return Err(GatewayError::DuplicateRoute {
                method: binding.method.clone(),
                path: binding.path.to_string(),
            });
        }
        router = router.route(binding.path, (binding.factory)(api.clone(), key.clone()));
    }

    Ok(router.layer(middleware::from_fn_with_state(sink, observer::access_log)))
}

/// The gateway mount: the fixed table registered with the observer
/// attached.
pub fn mount(
    api: ApiHandle,
    key: AuthKey,
    sink: Arc<dyn LogSink>,
) -> Result<Router, GatewayError> {
    mount_bindings(&feature_flag_bindings(), api, key, sink)
}
