//! Error types for the cmdlens tool layer.
//!
//! Nothing here escapes to the caller as a fault: every error is converted
//! into a structured `{ "success": false, "message": ... }` payload at the
//! tool boundary, because a failing query must not take down the host's
//! conversational turn.

use thiserror::Error;

/// Errors that can occur while handling a tool invocation.
///
/// Display strings are the operative, agent-visible messages, so they are in
/// the host ecosystem's language like the rest of the wire surface.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required parameter was absent or blank.
    #[error("缺少必需参数: {0}")]
    MissingParam(&'static str),

    /// Parameters failed to deserialize.
    #[error("参数格式错误: {0}")]
    InvalidParams(String),

    /// Internal failure while producing a response.
    #[error("内部错误: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidParams(err.to_string())
    }
}

impl From<anyhow::Error> for ToolError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Failure message for the structured payload: missing-parameter errors are
/// surfaced verbatim, anything else gets the operation's generic prefix so
/// internals never leak raw.
pub(crate) fn failure_message(operation: &str, err: &ToolError) -> String {
    match err {
        ToolError::MissingParam(_) => err.to_string(),
        ToolError::InvalidParams(_) | ToolError::Internal(_) => format!("{operation}: {err}"),
    }
}
