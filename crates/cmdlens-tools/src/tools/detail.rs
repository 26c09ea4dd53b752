//! Exact-name detail lookup tool.
//!
//! Called when the user asks how a specific command works. Resolves aliases
//! to their canonical data and, on a miss, falls back to a limit-3 search so
//! the agent always has something to suggest.

use cmdlens_core::{Detail, QueryEngine, normalize_name};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::ToolConfig;
use crate::error::{ToolError, ToolResult, failure_message};

/// Parameters for the detail tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailParams {
    /// Command name, with or without prefix (the sentinel is supplied
    /// automatically). Required.
    #[serde(default)]
    pub command_name: Option<String>,
}

/// Output from the detail tool. Absent fields are omitted from the wire
/// JSON, so the success and failure shapes look exactly as the agent
/// contract documents them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailOutput {
    /// Whether the name resolved.
    pub success: bool,
    /// Failure summary; only on misses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Resolved command name, display prefix applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning plugin display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    /// Alias names, display prefix applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    /// Up to 3 other real commands from the same plugin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_commands: Option<Vec<String>>,
    /// Canonical name when the queried name is an alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
    /// Alias explanation for the agent to relay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Close matches on a miss, possibly empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Handle a detail invocation.
#[tracing::instrument(skip(engine, config))]
pub async fn handle_detail(
    params: DetailParams,
    engine: &QueryEngine,
    config: &ToolConfig,
) -> ToolResult<DetailOutput> {
    let raw = params
        .command_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if raw.is_empty() {
        return Err(ToolError::MissingParam("command_name"));
    }

    tracing::info!(command = %raw, "agent queries command detail");

    match engine.detail(&raw).await {
        Detail::Found { record, related } => {
            let alias_of = record
                .alias_of
                .as_deref()
                .map(|name| config.display_command(name));
            let note = alias_of
                .as_deref()
                .map(|canonical| format!("这是 {canonical} 的别名"));

            Ok(DetailOutput {
                success: true,
                message: None,
                command: Some(config.display_command(&record.name)),
                description: Some(record.description.clone()),
                plugin: Some(record.plugin.clone()),
                aliases: Some(
                    record
                        .aliases
                        .iter()
                        .map(|alias| config.display_command(alias))
                        .collect(),
                ),
                similar_commands: Some(
                    related
                        .iter()
                        .map(|name| config.display_command(name))
                        .collect(),
                ),
                alias_of,
                note,
                suggestions: None,
            })
        },
        Detail::NotFound { suggestions } => {
            let display_name = config.display_command(&normalize_name(&raw));
            tracing::debug!(
                suggestions = suggestions.len(),
                "detail miss, returning suggestions"
            );
            Ok(DetailOutput {
                success: false,
                message: Some(format!("未找到指令 '{display_name}'")),
                command: None,
                description: None,
                plugin: None,
                aliases: None,
                similar_commands: None,
                alias_of: None,
                note: None,
                suggestions: Some(
                    suggestions
                        .iter()
                        .map(|record| config.display_command(&record.name))
                        .collect(),
                ),
            })
        },
    }
}

/// JSON boundary for the detail tool. Never fails.
pub async fn run(params: Value, engine: &QueryEngine, config: &ToolConfig) -> Value {
    let outcome = match serde_json::from_value::<DetailParams>(params).map_err(ToolError::from) {
        Ok(parsed) => handle_detail(parsed, engine, config).await,
        Err(err) => Err(err),
    };

    match outcome.and_then(|output| serde_json::to_value(output).map_err(ToolError::from)) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "detail tool failed");
            json!({
                "success": false,
                "message": failure_message("查询失败", &err),
            })
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::game_engine;

    fn params(name: &str) -> DetailParams {
        DetailParams {
            command_name: Some(name.to_string()),
        }
    }

    #[tokio::test]
    async fn test_detail_of_alias_carries_canonical_data() {
        let engine = game_engine();
        let output = handle_detail(params("fish"), &engine, &ToolConfig::default())
            .await
            .expect("detail");

        assert!(output.success);
        assert_eq!(output.command.as_deref(), Some("/fish"));
        assert_eq!(output.alias_of.as_deref(), Some("/钓鱼"));
        assert_eq!(output.description.as_deref(), Some("开始钓鱼游戏"));
        assert_eq!(output.plugin.as_deref(), Some("钓鱼游戏插件"));
        assert_eq!(output.note.as_deref(), Some("这是 /钓鱼 的别名"));
    }

    #[tokio::test]
    async fn test_detail_lists_same_plugin_commands() {
        let engine = game_engine();
        let output = handle_detail(params("钓鱼"), &engine, &ToolConfig::default())
            .await
            .expect("detail");

        let similar = output.similar_commands.expect("similar commands");
        assert_eq!(similar, vec!["/卖鱼", "/鱼塘", "/图鉴"]);
        assert!(output.alias_of.is_none());
        assert!(output.note.is_none());
    }

    #[tokio::test]
    async fn test_detail_accepts_prefixed_name() {
        let engine = game_engine();
        let output = handle_detail(params("/钓鱼"), &engine, &ToolConfig::default())
            .await
            .expect("detail");

        assert!(output.success);
        assert_eq!(output.command.as_deref(), Some("/钓鱼"));
    }

    #[tokio::test]
    async fn test_detail_miss_suggests_search_results() {
        let engine = game_engine();
        let output = handle_detail(params("不存在指令"), &engine, &ToolConfig::default())
            .await
            .expect("detail");

        assert!(!output.success);
        assert_eq!(output.message.as_deref(), Some("未找到指令 '/不存在指令'"));
        let suggestions = output.suggestions.expect("suggestions present on miss");
        assert!(suggestions.len() <= 3);
    }

    #[tokio::test]
    async fn test_missing_command_name_rejected() {
        let engine = game_engine();
        let err = handle_detail(
            DetailParams { command_name: None },
            &engine,
            &ToolConfig::default(),
        )
        .await
        .expect_err("command_name required");

        assert!(matches!(err, ToolError::MissingParam("command_name")));
    }

    #[tokio::test]
    async fn test_run_omits_absent_fields() {
        let engine = game_engine();
        let value = run(
            json!({"commandName": "钓鱼"}),
            &engine,
            &ToolConfig::default(),
        )
        .await;

        assert_eq!(value["success"], true);
        assert_eq!(value["similarCommands"][0], "/卖鱼");
        assert!(value.get("aliasOf").is_none());
        assert!(value.get("suggestions").is_none());
    }
}
