//! Method dispatch
//!
//! Each handler moves its store work onto the blocking pool and maps the
//! engine outcome onto a JSON-RPC response. Every structured error leaves
//! here stamped with the caller's request and trace ids.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use studex_core::errors::{ExError, ExErrorKind};
use studex_core::model::StudentRecord;
use studex_core::policy::EmptyPolicy;
use studex_core_types::correlation::RequestContext;
use studex_engine::{
    apply_engine_command_shared, apply_engine_query_shared, EngineCommand, EngineCommandResult,
    EngineQuery,
};

use crate::protocol::{error_codes, methods, JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse};

/// Store handle shared by every connection
pub type SharedStore = Arc<Mutex<Connection>>;

#[derive(Debug, Deserialize)]
struct StudentGetParams {
    name: String,
}

#[derive(Debug, Serialize)]
struct StudentAddResult {
    id: i64,
}

/// Request handlers over one shared store and one empty-input policy
#[derive(Clone)]
pub struct Handlers {
    store: SharedStore,
    policy: EmptyPolicy,
}

impl Handlers {
    pub fn new(store: SharedStore, policy: EmptyPolicy) -> Self {
        Self { store, policy }
    }

    /// Handle one NDJSON line.
    ///
    /// Returns `None` for notifications (requests without an `id` member).
    /// Text that is not JSON is a parse error; JSON that is not a request
    /// object is an invalid request.
    pub async fn handle_line(&self, line: &str, ctx: &RequestContext) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let request = match JsonRpcRequest::deserialize(&value) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    recover_id(&value),
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                "Invalid JSON-RPC version",
            ));
        }

        let is_notification = request.is_notification();
        let response = self.dispatch(request, ctx).await;
        (!is_notification).then_some(response)
    }

    /// Route a parsed request to its handler.
    pub async fn dispatch(&self, request: JsonRpcRequest, ctx: &RequestContext) -> JsonRpcResponse {
        debug!(method = %request.method, "dispatching");
        let id = request.id;

        let outcome = match request.method.as_str() {
            methods::STUDENT_ADD => self.handle_student_add(request.params).await,
            methods::STUDENT_GET => self.handle_student_get(request.params).await,

            methods::STATS_AVERAGE_GRADE => self.run_query(EngineQuery::AverageGrade).await,
            methods::STATS_GENDER_PERCENTAGE => {
                self.run_query(EngineQuery::GenderPercentage).await
            }
            methods::STATS_MAX_AGE_BY_GENDER => self.run_query(EngineQuery::MaxAgeByGender).await,
            methods::STATS_MIN_AGE_BY_GENDER => self.run_query(EngineQuery::MinAgeByGender).await,
            methods::STATS_AVERAGE_GRADE_BY_GENDER => {
                self.run_query(EngineQuery::AverageGradeByGender).await
            }
            methods::STATS_COMBINED => self.run_query(EngineQuery::CombinedSnapshot).await,

            _ => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Method not found: {}", request.method),
                )
            }
        };

        respond(id, outcome, ctx)
    }

    async fn handle_student_add(&self, params: Option<Value>) -> Result<Value, ExError> {
        let record: StudentRecord = parse_params("student_add", params)?;

        let store = Arc::clone(&self.store);
        let outcome = run_blocking(move || {
            apply_engine_command_shared(EngineCommand::StudentAdd { record }, &store)
        })
        .await?;

        match outcome {
            EngineCommandResult::StudentAdded { id } => to_value(StudentAddResult { id }),
            other => Err(ExError::new(ExErrorKind::Internal)
                .with_op("student_add")
                .with_message(format!("unexpected command result {:?}", other))),
        }
    }

    async fn handle_student_get(&self, params: Option<Value>) -> Result<Value, ExError> {
        let params: StudentGetParams = parse_params("student_get", params)?;
        self.run_query(EngineQuery::StudentGet { name: params.name })
            .await
    }

    async fn run_query(&self, query: EngineQuery) -> Result<Value, ExError> {
        let store = Arc::clone(&self.store);
        let policy = self.policy;
        let result = run_blocking(move || apply_engine_query_shared(query, &store, policy)).await?;
        to_value(result)
    }
}

/// Best-effort id of a request object that failed to deserialize
fn recover_id(value: &Value) -> Option<JsonRpcId> {
    value
        .get("id")
        .and_then(|id| JsonRpcId::deserialize(id).ok())
}

fn parse_params<T: serde::de::DeserializeOwned>(
    op: &str,
    params: Option<Value>,
) -> Result<T, ExError> {
    let invalid = |message: String| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op(op.to_string())
            .with_message(message)
    };
    let value = params.ok_or_else(|| invalid("Missing params".to_string()))?;
    serde_json::from_value(value).map_err(|e| invalid(format!("Invalid params: {}", e)))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ExError> {
    serde_json::to_value(value)
        .map_err(|e| ExError::new(ExErrorKind::Serialization).with_message(e.to_string()))
}

/// Run store work on the blocking pool
async fn run_blocking<T, F>(work: F) -> Result<T, ExError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ExError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(outcome) => outcome,
        Err(join_err) => Err(ExError::new(ExErrorKind::Internal)
            .with_op("spawn_blocking")
            .with_message(join_err.to_string())),
    }
}

/// Stamp an error with the ids of the request it failed
pub fn correlate(err: ExError, ctx: &RequestContext) -> ExError {
    let err = err.with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}

fn respond(
    id: Option<JsonRpcId>,
    outcome: Result<Value, ExError>,
    ctx: &RequestContext,
) -> JsonRpcResponse {
    match outcome {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => {
            let e = correlate(e, ctx);
            JsonRpcResponse::from_error(id, JsonRpcError::from_ex_error(&e))
        }
    }
}
