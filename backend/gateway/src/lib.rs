//! SoMark Gateway HTTP API Server
//!
//! Exposes the plugin's gateway methods over `POST /rpc` and its tools under
//! `/api/tools`.

pub mod health_api;
pub mod rpc;
pub mod server;
pub mod tools_api;

pub use rpc::{dispatch, RpcRequest, RpcResponse};
pub use server::{build_router, serve, start_server, GatewayState};
