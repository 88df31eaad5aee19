//! Gateway RPC: `{id?, method, params?}` in, `{id, ok, payload | error}` out.
//!
//! The `ok` flag mirrors the host's `respond(ok, payload)` convention, so a
//! failed call still returns HTTP 200.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use somark_plugins::{SomarkSyncPlugin, STATUS_METHOD};

use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RpcResponse {
    pub id: Option<Value>,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RpcResponse {
    fn ok(id: Option<Value>, payload: Value) -> Self {
        Self { id, ok: true, payload: Some(payload), error: None }
    }

    fn err(id: Option<Value>, error: impl Into<String>) -> Self {
        Self { id, ok: false, payload: None, error: Some(error.into()) }
    }
}

/// Route a method call to the plugin.
pub fn dispatch(plugin: &SomarkSyncPlugin, request: RpcRequest) -> RpcResponse {
    match request.method.as_str() {
        STATUS_METHOD => match serde_json::to_value(plugin.status()) {
            Ok(payload) => RpcResponse::ok(request.id, payload),
            Err(e) => RpcResponse::err(request.id, e.to_string()),
        },
        other => {
            warn!(method = other, "Unknown gateway method");
            RpcResponse::err(request.id, format!("unknown method: {other}"))
        }
    }
}

/// Handler for `POST /rpc`
pub async fn handle_rpc(
    State(state): State<GatewayState>,
    Json(request): Json<RpcRequest>,
) -> Json<RpcResponse> {
    let span = info_span!("rpc", request_id = %Uuid::new_v4(), method = %request.method);
    async move { Json(dispatch(&state.plugin, request)) }
        .instrument(span)
        .await
}
