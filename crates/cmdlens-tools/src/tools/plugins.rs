//! Plugin listing tool.
//!
//! Without a filter it enumerates every plugin by name - the agent's answer
//! to "这个机器人能做什么". With a filter it returns one plugin's full
//! command list.

use cmdlens_core::{PluginLookup, QueryEngine};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::ToolConfig;
use crate::error::{ToolError, ToolResult, failure_message};

/// Parameters for the plugin listing tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginsParams {
    /// Optional plugin-name filter. Empty or absent lists all plugins;
    /// otherwise the first plugin whose display name contains this string
    /// (case-insensitively) is expanded.
    #[serde(default)]
    pub plugin_name: Option<String>,
}

/// One command in a plugin's listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginCommandEntry {
    /// Command name with the display prefix.
    pub command: String,
    /// Description text.
    pub description: String,
    /// Alias names with the display prefix.
    pub aliases: Vec<String>,
}

/// All plugins, by name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOverview {
    /// Always true.
    pub success: bool,
    /// Plugin count summary.
    pub message: String,
    /// Sorted plugin display names.
    pub plugins: Vec<String>,
    /// Follow-up guidance for the agent.
    pub hint: String,
}

/// One plugin's commands.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginCommands {
    /// Always true.
    pub success: bool,
    /// Matched plugin display name.
    pub plugin: String,
    /// Number of real commands.
    pub command_count: usize,
    /// The commands, index order.
    pub commands: Vec<PluginCommandEntry>,
}

/// Filter matched nothing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginNotFound {
    /// Always false.
    pub success: bool,
    /// Failure summary.
    pub message: String,
    /// Sorted names of the plugins that do exist.
    pub available_plugins: Vec<String>,
}

/// Output from the plugin listing tool: one of three shapes depending on the
/// filter and whether it matched.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PluginsOutput {
    /// No filter: every plugin by name.
    Overview(PluginOverview),
    /// Filter matched: that plugin's commands.
    Commands(PluginCommands),
    /// Filter matched nothing.
    NotFound(PluginNotFound),
}

/// Handle a plugin listing invocation.
#[tracing::instrument(skip(engine, config))]
pub async fn handle_plugins(
    params: PluginsParams,
    engine: &QueryEngine,
    config: &ToolConfig,
) -> ToolResult<PluginsOutput> {
    let filter = params
        .plugin_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    if filter.is_empty() {
        let plugins = engine.plugin_names().await;
        tracing::info!(count = plugins.len(), "agent lists all plugins");
        return Ok(PluginsOutput::Overview(PluginOverview {
            success: true,
            message: format!("系统共有 {} 个插件", plugins.len()),
            plugins,
            hint: "使用 list_plugin_commands 并指定 pluginName 参数查看具体插件的指令"
                .to_string(),
        }));
    }

    tracing::info!(filter = %filter, "agent lists plugin commands");
    match engine.plugin_commands(&filter).await {
        PluginLookup::Matched(group) => {
            let commands: Vec<PluginCommandEntry> = group
                .commands
                .iter()
                .map(|record| PluginCommandEntry {
                    command: config.display_command(&record.name),
                    description: record.description.clone(),
                    aliases: record
                        .aliases
                        .iter()
                        .map(|alias| config.display_command(alias))
                        .collect(),
                })
                .collect();

            Ok(PluginsOutput::Commands(PluginCommands {
                success: true,
                plugin: group.name,
                command_count: commands.len(),
                commands,
            }))
        },
        PluginLookup::NoMatch { available } => Ok(PluginsOutput::NotFound(PluginNotFound {
            success: false,
            message: format!("未找到插件 '{filter}'"),
            available_plugins: available,
        })),
    }
}

/// JSON boundary for the plugin listing tool. Never fails.
pub async fn run(params: Value, engine: &QueryEngine, config: &ToolConfig) -> Value {
    let outcome = match serde_json::from_value::<PluginsParams>(params).map_err(ToolError::from) {
        Ok(parsed) => handle_plugins(parsed, engine, config).await,
        Err(err) => Err(err),
    };

    match outcome.and_then(|output| serde_json::to_value(output).map_err(ToolError::from)) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "plugin listing tool failed");
            json!({
                "success": false,
                "message": failure_message("查询失败", &err),
            })
        },
    }
}
