// src/api/responses.rs
//! Wire shapes of the incremental-load endpoint.
//!
//! The endpoint speaks JSON-RPC 2.0: the request names a method and carries
//! the page size; the reply nests the listing result under `result`.

use crate::constants::RPC_METHOD;
use crate::types::PageSize;
use serde::{Deserialize, Serialize};

/// Request body posted to the incremental-load endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: LazyLoadParams,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LazyLoadParams {
    pub ppg: u32,
}

impl RpcRequest {
    pub fn lazy_load(page_size: PageSize) -> Self {
        Self {
            jsonrpc: "2.0",
            method: RPC_METHOD,
            params: LazyLoadParams {
                ppg: page_size.get(),
            },
            id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Outer JSON-RPC reply.
#[derive(Debug, Deserialize)]
pub(super) struct RpcResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC level failure (server exception, session expired, ...).
#[derive(Debug, Deserialize)]
pub(super) struct RpcErrorObject {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<RpcErrorData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RpcErrorData {
    #[serde(default)]
    pub message: Option<String>,
}

impl RpcErrorObject {
    /// The most specific message the server sent.
    pub fn describe(&self) -> String {
        let message = self
            .data
            .as_ref()
            .and_then(|d| d.message.clone())
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "unspecified server error".to_string());
        match self.code {
            Some(code) => format!("{} (code {})", message, code),
            None => message,
        }
    }
}

/// The listing result nested under `result`.
///
/// Every field is optional here; [`super::parser`] decides which
/// combinations are acceptable.
#[derive(Debug, Deserialize)]
pub(super) struct RawLazyLoadResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, rename = "tableWrapper", alias = "fragment")]
    pub fragment: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}
