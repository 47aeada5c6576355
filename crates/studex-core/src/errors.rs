use studex_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using StatsError
pub type Result<T> = std::result::Result<T, StatsError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code that the RPC façade forwards to clients
/// and that tests assert against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    NotFound,

    // Aggregation
    EmptyDataset,
    EmptyPartition,

    // Store
    StoreUnavailable,
    Migration,
    ChecksumMismatch,

    // Integration/IO
    Io,
    Serialization,
    Timeout,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::EmptyDataset => "ERR_EMPTY_DATASET",
            ExErrorKind::EmptyPartition => "ERR_EMPTY_PARTITION",
            ExErrorKind::StoreUnavailable => "ERR_STORE_UNAVAILABLE",
            ExErrorKind::Migration => "ERR_MIGRATION",
            ExErrorKind::ChecksumMismatch => "ERR_CHECKSUM_MISMATCH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus context
/// (operation, entity, correlation ids) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (a student name, a migration id, ...)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for record validation and aggregation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// No records exist to aggregate over
    #[error("No student records to aggregate")]
    EmptyDataset,

    /// One gender partition has no records
    #[error("No student records with gender {gender}")]
    EmptyPartition { gender: String },

    /// By-name lookup found nothing
    #[error("Student not found: {name}")]
    RecordNotFound { name: String },

    /// Record rejected at insert time
    #[error("Invalid student record: {reason}")]
    InvalidRecord { reason: String },

    /// Record store failure, surfaced unmodified
    #[error("Record store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<StatsError> for ExError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::EmptyDataset => ExError::new(ExErrorKind::EmptyDataset)
                .with_message("No student records to aggregate"),

            StatsError::EmptyPartition { gender } => ExError::new(ExErrorKind::EmptyPartition)
                .with_message(format!("No student records with gender {}", gender))
                .with_entity_id(gender),

            StatsError::RecordNotFound { name } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(name)
                .with_message("Student not found"),

            StatsError::InvalidRecord { reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid student record: {}", reason)),

            StatsError::StoreUnavailable { message } => {
                ExError::new(ExErrorKind::StoreUnavailable).with_message(message)
            }

            StatsError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            StatsError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        StatsError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_error_kind_codes() {
        let cases = [
            (ExErrorKind::EmptyDataset, "ERR_EMPTY_DATASET"),
            (ExErrorKind::EmptyPartition, "ERR_EMPTY_PARTITION"),
            (ExErrorKind::StoreUnavailable, "ERR_STORE_UNAVAILABLE"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_code_op_and_entity() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("student_get")
            .with_entity_id("Alice")
            .with_message("Student not found");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_NOT_FOUND]"));
        assert!(rendered.contains("student_get"));
        assert!(rendered.contains("Alice"));
    }

    #[test]
    fn test_correlation_ids_none_by_default() {
        let err = ExError::new(ExErrorKind::Internal);
        assert!(err.request_id().is_none());
        assert!(err.trace_id().is_none());
    }
}
