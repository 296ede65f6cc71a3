//! Handler factories for the route table.
//!
//! Each factory closes over the shared backend client and auth key and
//! returns the request handler bound at registration time. The handlers
//! are thin relays: the backend owns the business logic, the gateway
//! passes `(status, JSON body)` through verbatim. A transport failure
//! toward the backend becomes a 502 with an error body.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, MethodRouter};
use axum::Json;
use serde_json::{json, Value};

use super::{ApiHandle, AuthKey};
use crate::api::{ApiError, ApiResponse};

fn relay(result: Result<ApiResponse, ApiError>) -> Response {
    match result {
        Ok(upstream) => {
            let status =
                StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(upstream.body)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "backend call failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub fn initialize_free_workspace(api: ApiHandle, key: AuthKey) -> MethodRouter {
    post(move |Json(payload): Json<Value>| {
        let api = api.clone();
        let key = key.clone();
        async move { relay(api.initialize_workspace(&key, payload).await) }
    })
}

pub fn activate_license(api: ApiHandle, key: AuthKey) -> MethodRouter {
    post(move |Json(payload): Json<Value>| {
        let api = api.clone();
        let key = key.clone();
        async move { relay(api.activate_license(&key, payload).await) }
    })
}

pub fn get_feature_flags(api: ApiHandle, key: AuthKey) -> MethodRouter {
    post(move |Json(payload): Json<Value>| {
        let api = api.clone();
        let key = key.clone();
        async move { relay(api.feature_flags(&key, payload).await) }
    })
}

pub fn sync_workspace_subscription(api: ApiHandle, key: AuthKey) -> MethodRouter {
    patch(
        move |Path(workspace_id): Path<String>, Json(payload): Json<Value>| {
            let api = api.clone();
            let key = key.clone();
            async move { relay(api.sync_subscription(&key, &workspace_id, payload).await) }
        },
    )
}

pub fn get_workspace_license(api: ApiHandle, key: AuthKey) -> MethodRouter {
    get(move |Path(workspace_id): Path<String>| {
        let api = api.clone();
        let key = key.clone();
        async move { relay(api.workspace_license(&key, &workspace_id).await) }
    })
}

pub fn get_workspace_product(api: ApiHandle, key: AuthKey) -> MethodRouter {
    post(
        move |Path(workspace_id): Path<String>, Json(payload): Json<Value>| {
            let api = api.clone();
            let key = key.clone();
            async move { relay(api.workspace_product(&key, &workspace_id, payload).await) }
        },
    )
}

/// Reserved: `POST /subscriptions/check/ { workspace_id }` -> 200 | 400
/// with a boolean body, once the backend contract is finalized.
pub fn check_subscription(_api: ApiHandle, _key: AuthKey) -> MethodRouter {
    post(|| async {
        (
            StatusCode::NOT_IMPLEMENTED,
            Json(json!({ "detail": "not implemented" })),
        )
    })
}
