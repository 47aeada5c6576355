//! JSON-RPC 2.0 protocol types.
//!
//! Framing is NDJSON: one request object per line in, one response object
//! per line out.

use serde::{Deserialize, Deserializer, Serialize};
use studex_core::errors::{ExError, ExErrorKind};

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// `None` only when the member is absent (a notification); an explicit
    /// `null` is `Some(JsonRpcId::Null)` and still gets a response
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<JsonRpcId>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    /// Always written; `null` when the request id could not be read
    pub id: Option<JsonRpcId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC ID (string, number, or null).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum JsonRpcId {
    String(String),
    Number(i64),
    Null,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<JsonRpcId>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonRpcId::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    /// True when the request carries no `id` member at all
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    /// Map a structured error onto a JSON-RPC error.
    ///
    /// `data.code` carries the stable `ERR_*` code so clients can branch on
    /// it without parsing the message.
    pub fn from_ex_error(err: &ExError) -> Self {
        let mut data = serde_json::json!({ "code": err.code() });
        if let Some(op) = err.op() {
            data["op"] = serde_json::Value::from(op);
        }
        if let Some(entity_id) = err.entity_id() {
            data["entity_id"] = serde_json::Value::from(entity_id);
        }
        if let Some(request_id) = err.request_id() {
            data["request_id"] = serde_json::Value::from(request_id.as_str());
        }
        if let Some(trace_id) = err.trace_id() {
            data["trace_id"] = serde_json::Value::from(trace_id.as_str());
        }

        Self {
            code: error_codes::for_kind(err.kind()),
            message: err.message().to_string(),
            data: Some(data),
        }
    }
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<JsonRpcId>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<JsonRpcId>, code: i32, message: impl Into<String>) -> Self {
        Self::from_error(
            id,
            JsonRpcError {
                code,
                message: message.into(),
                data: None,
            },
        )
    }

    pub fn from_error(id: Option<JsonRpcId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error codes.
///
/// Standard JSON-RPC 2.0 codes plus service-specific codes in the
/// implementation-defined range.
pub mod error_codes {
    use super::ExErrorKind;

    // Standard JSON-RPC 2.0 error codes
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    // Service codes
    pub const RECORD_NOT_FOUND: i32 = -32002;
    pub const EMPTY_DATASET: i32 = -32003;
    pub const STORE_UNAVAILABLE: i32 = -32004;
    pub const REQUEST_TIMEOUT: i32 = -32005;
    /// Connection limit reached; sent once, then the connection is closed
    pub const SERVER_BUSY: i32 = -32010;

    /// Code for a structured error kind
    pub fn for_kind(kind: ExErrorKind) -> i32 {
        match kind {
            ExErrorKind::NotFound => RECORD_NOT_FOUND,
            ExErrorKind::EmptyDataset | ExErrorKind::EmptyPartition => EMPTY_DATASET,
            ExErrorKind::InvalidInput => INVALID_PARAMS,
            ExErrorKind::StoreUnavailable
            | ExErrorKind::Migration
            | ExErrorKind::ChecksumMismatch
            | ExErrorKind::Io => STORE_UNAVAILABLE,
            ExErrorKind::Timeout => REQUEST_TIMEOUT,
            ExErrorKind::Serialization | ExErrorKind::Internal => INTERNAL_ERROR,
        }
    }
}

/// Method names.
pub mod methods {
    pub const STUDENT_ADD: &str = "student.add";
    pub const STUDENT_GET: &str = "student.get";

    pub const STATS_AVERAGE_GRADE: &str = "stats.average_grade";
    pub const STATS_GENDER_PERCENTAGE: &str = "stats.gender_percentage";
    pub const STATS_MAX_AGE_BY_GENDER: &str = "stats.max_age_by_gender";
    pub const STATS_MIN_AGE_BY_GENDER: &str = "stats.min_age_by_gender";
    pub const STATS_AVERAGE_GRADE_BY_GENDER: &str = "stats.average_grade_by_gender";
    pub const STATS_COMBINED: &str = "stats.combined";
}
