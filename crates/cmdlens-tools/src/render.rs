//! Plain-text rendering for the host's thin chat surface.
//!
//! The host dispatches a handful of chat commands straight onto the query
//! tools; these functions turn the tools' typed outputs into the plain-text
//! replies those commands send back. Long lists are truncated so a reply
//! stays readable inside a chat message.

use crate::tools::{DetailOutput, PluginsOutput, SearchOutput};

/// Plugins shown in the overview before truncating.
const OVERVIEW_LIMIT: usize = 20;
/// Available-plugin names shown on a filter miss.
const AVAILABLE_LIMIT: usize = 10;

/// Render a search reply.
pub fn render_search(keyword: &str, output: &SearchOutput) -> String {
    if !output.success {
        return format!("❌ {}", output.message);
    }

    let mut text = format!("🔍 搜索 '{keyword}' 的结果：\n\n");
    for (i, hit) in output.results.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, hit.command));
        text.push_str(&format!("   📦 插件: {}\n", hit.plugin));
        text.push_str(&format!("   📝 描述: {}\n", hit.description));
        if !hit.aliases.is_empty() {
            text.push_str(&format!("   🔗 别名: {}\n", hit.aliases.join(", ")));
        }
        if let Some(canonical) = &hit.alias_of {
            text.push_str(&format!("   ℹ️  这是 {canonical} 的别名\n"));
        }
        text.push('\n');
    }
    text.trim_end().to_string()
}

/// Render a detail reply.
pub fn render_detail(output: &DetailOutput) -> String {
    if !output.success {
        let mut text = format!("❌ {}\n", output.message.as_deref().unwrap_or("查询失败"));
        if let Some(suggestions) = output.suggestions.as_deref() {
            if !suggestions.is_empty() {
                text.push_str("\n💡 你可能想找：\n");
                for name in suggestions {
                    text.push_str(&format!("  • {name}\n"));
                }
            }
        }
        return text.trim_end().to_string();
    }

    let mut text = String::from("📋 指令详情\n\n");
    text.push_str(&format!(
        "🎯 指令: {}\n",
        output.command.as_deref().unwrap_or_default()
    ));
    text.push_str(&format!(
        "📦 插件: {}\n",
        output.plugin.as_deref().unwrap_or_default()
    ));
    text.push_str(&format!(
        "📝 描述: {}\n",
        output.description.as_deref().unwrap_or_default()
    ));
    if let Some(aliases) = output.aliases.as_deref() {
        if !aliases.is_empty() {
            text.push_str(&format!("🔗 别名: {}\n", aliases.join(", ")));
        }
    }
    if let Some(note) = &output.note {
        text.push_str(&format!("\nℹ️  {note}\n"));
    }
    if let Some(similar) = output.similar_commands.as_deref() {
        if !similar.is_empty() {
            text.push_str("\n💡 相关指令:\n");
            for name in similar {
                text.push_str(&format!("  • {name}\n"));
            }
        }
    }
    text.trim_end().to_string()
}

/// Render a plugin-listing reply, whichever shape the tool produced.
pub fn render_plugins(output: &PluginsOutput) -> String {
    match output {
        PluginsOutput::Overview(overview) => {
            let mut text = format!("📦 系统插件列表 ({} 个)\n\n", overview.plugins.len());
            for name in overview.plugins.iter().take(OVERVIEW_LIMIT) {
                text.push_str(&format!("  • {name}\n"));
            }
            if overview.plugins.len() > OVERVIEW_LIMIT {
                text.push_str(&format!(
                    "\n... 还有 {} 个插件\n",
                    overview.plugins.len() - OVERVIEW_LIMIT
                ));
            }
            text.push_str("\n💡 使用 /插件列表 <插件名> 查看插件的指令");
            text
        },
        PluginsOutput::Commands(listing) => {
            let mut text = format!("📦 {}\n共 {} 条指令\n\n", listing.plugin, listing.command_count);
            for entry in &listing.commands {
                text.push_str(&format!("• {}\n", entry.command));
                text.push_str(&format!("  {}\n", entry.description));
                if !entry.aliases.is_empty() {
                    text.push_str(&format!("  别名: {}\n", entry.aliases.join(", ")));
                }
                text.push('\n');
            }
            text.trim_end().to_string()
        },
        PluginsOutput::NotFound(miss) => {
            let mut text = format!("❌ {}\n", miss.message);
            if !miss.available_plugins.is_empty() {
                text.push_str("\n可用插件列表：\n");
                for name in miss.available_plugins.iter().take(AVAILABLE_LIMIT) {
                    text.push_str(&format!("  • {name}\n"));
                }
                if miss.available_plugins.len() > AVAILABLE_LIMIT {
                    text.push_str(&format!(
                        "  ... 还有 {} 个插件\n",
                        miss.available_plugins.len() - AVAILABLE_LIMIT
                    ));
                }
            }
            text.trim_end().to_string()
        },
    }
}

/// Static help panel for the chat surface.
pub fn help_text() -> String {
    "=== 指令查询 ===\n\n\
     【核心功能】\n\
     为对话智能体提供实时指令查询能力：\n\
     ✅ 纠正用户输入的错误指令\n\
     ✅ 引导用户正确使用功能\n\
     ✅ 推荐相关指令\n\n\
     【智能体工具】\n\
     1️⃣ search_command(keyword) - 模糊搜索指令\n\
     2️⃣ get_command_detail(commandName) - 查询指令详情\n\
     3️⃣ list_plugin_commands(pluginName) - 列举插件指令\n\n\
     【聊天命令】\n\
     /指令搜索 <关键词>  - 搜索指令\n\
     /指令详情 <指令名>  - 查询指令详情\n\
     /插件列表 [插件名]  - 查看插件列表或插件的指令\n\
     /刷新指令缓存       - 重建指令索引"
        .to_string()
}
