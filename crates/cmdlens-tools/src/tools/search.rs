//! Keyword search tool.
//!
//! The agent's entry point for correcting mistyped commands ("/钩鱼" →
//! "/钓鱼"), answering "is there a lottery feature?", and finding a command
//! from a loose description of what the user wants.

use cmdlens_core::QueryEngine;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::ToolConfig;
use crate::error::{ToolError, ToolResult, failure_message};
use crate::tools::CommandInfo;

/// Result cap when the caller does not pass a limit.
const DEFAULT_LIMIT: usize = 5;

/// Parameters for the search tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Search keyword: a mistyped command name, a feature word, or part of a
    /// plugin name. Required.
    #[serde(default)]
    pub keyword: Option<String>,

    /// Maximum number of results (default 5, minimum 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Output from the search tool.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    /// Whether any command matched.
    pub success: bool,
    /// Human/agent-readable summary.
    pub message: String,
    /// Matched commands, best tier first. Empty on failure.
    pub results: Vec<CommandInfo>,
}

/// Handle a search invocation.
#[tracing::instrument(skip(engine, config))]
pub async fn handle_search(
    params: SearchParams,
    engine: &QueryEngine,
    config: &ToolConfig,
) -> ToolResult<SearchOutput> {
    let keyword = params
        .keyword
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if keyword.is_empty() {
        return Err(ToolError::MissingParam("keyword"));
    }
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).max(1);

    tracing::info!(keyword = %keyword, limit, "agent searches commands");
    let records = engine.search(&keyword, limit).await;

    if records.is_empty() {
        return Ok(SearchOutput {
            success: false,
            message: format!("未找到与 '{keyword}' 相关的指令"),
            results: Vec::new(),
        });
    }

    let results: Vec<CommandInfo> = records
        .iter()
        .map(|record| CommandInfo::from_record(record, config))
        .collect();
    tracing::debug!(count = results.len(), "search hits");

    Ok(SearchOutput {
        success: true,
        message: format!("找到 {} 条与 '{keyword}' 相关的指令", results.len()),
        results,
    })
}

/// JSON boundary for the search tool. Never fails: malformed parameters and
/// internal errors fold into a structured failure payload.
pub async fn run(params: Value, engine: &QueryEngine, config: &ToolConfig) -> Value {
    let outcome = match serde_json::from_value::<SearchParams>(params).map_err(ToolError::from) {
        Ok(parsed) => handle_search(parsed, engine, config).await,
        Err(err) => Err(err),
    };

    match outcome.and_then(|output| serde_json::to_value(output).map_err(ToolError::from)) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "search tool failed");
            json!({
                "success": false,
                "message": failure_message("搜索失败", &err),
                "results": [],
            })
        },
    }
}
