//! Tool invocation over HTTP.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use somark_core::{SomarkError, ToolDefinition};

use crate::server::GatewayState;

/// Handler for `GET /api/tools`
pub async fn list_tools(State(state): State<GatewayState>) -> Json<Vec<ToolDefinition>> {
    Json(state.plugin.tools().definitions())
}

/// Handler for `POST /api/tools/:name`
///
/// Extraction failures are still 200 with `success: false`; only problems with
/// the call itself map to error statuses.
pub async fn invoke_tool(
    State(state): State<GatewayState>,
    Path(name): Path<String>,
    Json(args): Json<Value>,
) -> (StatusCode, Json<Value>) {
    match state.plugin.invoke_tool(&name, args).await {
        Ok(output) => (StatusCode::OK, Json(output)),
        Err(e) => {
            let status = match &e {
                SomarkError::UnknownTool(_) => StatusCode::NOT_FOUND,
                SomarkError::InvalidArguments { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!(tool = %name, error = %e, "Tool invocation failed");
            (status, Json(json!({ "error": e.to_string() })))
        }
    }
}
