//! Query tools exposed to the conversational agent.
//!
//! Each tool has a typed handler (`handle_*`) returning a serde output
//! struct, plus a `run` boundary that accepts raw JSON parameters and never
//! fails - any handler error is logged and folded into a structured
//! `{ "success": false }` payload.

pub mod detail;
pub mod plugins;
pub mod refresh;
pub mod search;

pub use detail::{DetailOutput, DetailParams, handle_detail};
pub use plugins::{PluginsOutput, PluginsParams, handle_plugins};
pub use refresh::{RefreshOutput, handle_refresh};
pub use search::{SearchOutput, SearchParams, handle_search};

use cmdlens_core::CommandRecord;
use serde::{Deserialize, Serialize};

use crate::config::ToolConfig;

/// Wire representation of one command, display prefix applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInfo {
    /// Command name with the display prefix.
    pub command: String,
    /// Description text.
    pub description: String,
    /// Owning plugin's display name.
    pub plugin: String,
    /// Alias names with the display prefix, declaration order.
    pub aliases: Vec<String>,
    /// Canonical name when this entry is an alias; omitted otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
}

impl CommandInfo {
    /// Build the wire shape from an index record, rewriting every command
    /// name with the configured display prefix.
    pub fn from_record(record: &CommandRecord, config: &ToolConfig) -> Self {
        Self {
            command: config.display_command(&record.name),
            description: record.description.clone(),
            plugin: record.plugin.clone(),
            aliases: record
                .aliases
                .iter()
                .map(|alias| config.display_command(alias))
                .collect(),
            alias_of: record
                .alias_of
                .as_deref()
                .map(|name| config.display_command(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdlens_core::CommandRecord;

    #[test]
    fn test_command_info_applies_display_prefix_everywhere() {
        let record = CommandRecord {
            name: "/fish".to_string(),
            description: "开始钓鱼游戏".to_string(),
            plugin: "钓鱼游戏插件".to_string(),
            aliases: vec!["/fishing".to_string(), "/fish".to_string()],
            alias_of: Some("/钓鱼".to_string()),
        };
        let info = CommandInfo::from_record(&record, &ToolConfig::with_prefix("~"));

        assert_eq!(info.command, "~fish");
        assert_eq!(info.aliases, vec!["~fishing", "~fish"]);
        assert_eq!(info.alias_of.as_deref(), Some("~钓鱼"));
    }

    #[test]
    fn test_command_info_omits_alias_of_for_real_commands() {
        let record = CommandRecord {
            name: "/钓鱼".to_string(),
            description: "开始钓鱼游戏".to_string(),
            plugin: "钓鱼游戏插件".to_string(),
            aliases: Vec::new(),
            alias_of: None,
        };
        let info = CommandInfo::from_record(&record, &ToolConfig::default());
        let json = serde_json::to_value(&info).expect("serialize");

        assert!(json.get("aliasOf").is_none());
        assert_eq!(json["command"], "/钓鱼");
    }
}
