//! Command index construction from a plugin snapshot.
//!
//! Turns the host's flat handler registry into the alias-aware
//! [`CommandIndex`]. The registry is partitioned by module identity in a
//! single pass, so the whole build costs O(plugins + handlers) rather than
//! re-scanning the registry once per plugin.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::snapshot::{HandlerDescriptor, PluginSnapshot};
use crate::types::{CommandIndex, CommandRecord, NO_DESCRIPTION, normalize_name};

/// Plugins that never contribute commands: the host's built-in plugin and
/// this component's own registration.
const DENYLIST: &[&str] = &["core", "cmdlens"];

/// Build a [`CommandIndex`] from a captured snapshot.
///
/// Every alias in a handler's alias set gets its own record with `alias_of`
/// pointing at the canonical name. The alias record duplicates the canonical
/// description, plugin, and alias list so an alias lookup is a single hash
/// access with no second indirection.
///
/// The build is total: malformed entries (no module identity, no filter) are
/// skipped, never errors.
pub fn build(snapshot: &PluginSnapshot) -> CommandIndex {
    let by_module = partition_handlers(&snapshot.handlers);

    let mut index = CommandIndex::new();
    for plugin in &snapshot.plugins {
        if DENYLIST.contains(&plugin.display_name.as_str()) {
            continue;
        }
        let Some(module) = plugin.module_identity.as_deref() else {
            debug!(plugin = %plugin.display_name, "plugin has no module identity, skipping");
            continue;
        };
        let Some(handlers) = by_module.get(module) else {
            continue;
        };

        for handler in handlers {
            let Some(resolved) = handler.resolved_command() else {
                continue;
            };
            let name = normalize_name(resolved.name());
            let description = handler
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string());
            let aliases: Vec<String> = handler
                .aliases
                .iter()
                .map(|alias| normalize_name(alias))
                .collect();

            index.insert(CommandRecord {
                name: name.clone(),
                description: description.clone(),
                plugin: plugin.display_name.clone(),
                aliases: aliases.clone(),
                alias_of: None,
            });
            for alias in &aliases {
                index.insert(CommandRecord {
                    name: alias.clone(),
                    description: description.clone(),
                    plugin: plugin.display_name.clone(),
                    aliases: aliases.clone(),
                    alias_of: Some(name.clone()),
                });
            }
        }
    }

    info!(
        total = index.len(),
        real = index.real_count(),
        aliases = index.alias_count(),
        "command index built"
    );
    index
}

/// Single pass over the full handler registry, bucketed by module identity.
fn partition_handlers(
    handlers: &[HandlerDescriptor],
) -> HashMap<&str, Vec<&HandlerDescriptor>> {
    let mut by_module: HashMap<&str, Vec<&HandlerDescriptor>> = HashMap::new();
    for handler in handlers {
        by_module
            .entry(handler.module_identity.as_str())
            .or_default()
            .push(handler);
    }
    by_module
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ActivatedPlugin, CommandGroupFilter};

    fn fishing_snapshot() -> PluginSnapshot {
        PluginSnapshot {
            plugins: vec![ActivatedPlugin::new("钓鱼游戏插件", "pkg.fishing")],
            handlers: vec![
                HandlerDescriptor::command("pkg.fishing", "钓鱼")
                    .with_description("开始钓鱼游戏")
                    .with_aliases(vec!["fishing", "fish"]),
                HandlerDescriptor::command("pkg.fishing", "卖鱼").with_description("出售渔获"),
            ],
        }
    }

    #[test]
    fn test_build_creates_canonical_and_alias_records() {
        let index = build(&fishing_snapshot());

        let canonical = index.get("/钓鱼").expect("canonical record");
        assert!(canonical.alias_of.is_none());
        assert_eq!(canonical.description, "开始钓鱼游戏");
        assert_eq!(canonical.plugin, "钓鱼游戏插件");
        assert_eq!(canonical.aliases, vec!["/fishing", "/fish"]);

        let alias = index.get("/fish").expect("alias record");
        assert_eq!(alias.alias_of.as_deref(), Some("/钓鱼"));
        assert_eq!(alias.description, "开始钓鱼游戏");
        assert_eq!(alias.plugin, "钓鱼游戏插件");
        assert_eq!(alias.aliases, vec!["/fishing", "/fish"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let snapshot = fishing_snapshot();
        let first = build(&snapshot);
        let second = build(&snapshot);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.records().zip(second.records()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_alias_symmetry() {
        let index = build(&fishing_snapshot());

        for record in index.records() {
            if let Some(canonical_name) = &record.alias_of {
                let canonical = index
                    .get(canonical_name)
                    .expect("alias points at an indexed record");
                assert!(canonical.alias_of.is_none(), "alias target must be real");
                assert!(canonical.aliases.contains(&record.name));
            } else {
                for alias in &record.aliases {
                    let alias_record = index.get(alias).expect("alias has its own record");
                    assert_eq!(alias_record.alias_of.as_deref(), Some(record.name.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_denylisted_plugins_contribute_nothing() {
        let snapshot = PluginSnapshot {
            plugins: vec![
                ActivatedPlugin::new("core", "pkg.core"),
                ActivatedPlugin::new("cmdlens", "pkg.cmdlens"),
            ],
            handlers: vec![
                HandlerDescriptor::command("pkg.core", "help"),
                HandlerDescriptor::command("pkg.cmdlens", "query"),
            ],
        };

        assert!(build(&snapshot).is_empty());
    }

    #[test]
    fn test_plugin_without_module_identity_is_skipped() {
        let snapshot = PluginSnapshot {
            plugins: vec![ActivatedPlugin::unresolved("幽灵插件")],
            handlers: vec![HandlerDescriptor::command("pkg.ghost", "haunt")],
        };

        assert!(build(&snapshot).is_empty());
    }

    #[test]
    fn test_handlers_attributed_by_module_identity_only() {
        let snapshot = PluginSnapshot {
            plugins: vec![ActivatedPlugin::new("钓鱼游戏插件", "pkg.fishing")],
            handlers: vec![
                HandlerDescriptor::command("pkg.other", "外部指令"),
                HandlerDescriptor::command("pkg.fishing", "钓鱼"),
            ],
        };
        let index = build(&snapshot);

        assert!(index.get("/钓鱼").is_some());
        assert!(index.get("/外部指令").is_none());
    }

    #[test]
    fn test_group_filter_contributes_group_name() {
        let snapshot = PluginSnapshot {
            plugins: vec![ActivatedPlugin::new("管理插件", "pkg.admin")],
            handlers: vec![HandlerDescriptor::group("pkg.admin", "admin")],
        };
        let index = build(&snapshot);

        let record = index.get("/admin").expect("group record");
        assert_eq!(record.description, NO_DESCRIPTION);
        assert!(record.aliases.is_empty());
    }

    #[test]
    fn test_command_filter_wins_when_both_filters_present() {
        let mut handler = HandlerDescriptor::command("pkg.admin", "ban");
        handler.group_filter = Some(CommandGroupFilter {
            name: "admin".to_string(),
        });
        let snapshot = PluginSnapshot {
            plugins: vec![ActivatedPlugin::new("管理插件", "pkg.admin")],
            handlers: vec![handler],
        };
        let index = build(&snapshot);

        assert!(index.get("/ban").is_some());
        assert!(index.get("/admin").is_none());
    }

    #[test]
    fn test_empty_description_gets_placeholder() {
        let snapshot = PluginSnapshot {
            plugins: vec![ActivatedPlugin::new("p", "pkg.p")],
            handlers: vec![HandlerDescriptor::command("pkg.p", "cmd").with_description("")],
        };
        let index = build(&snapshot);

        assert_eq!(index.get("/cmd").expect("record").description, NO_DESCRIPTION);
    }
}
