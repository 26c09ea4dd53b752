//! Plugin snapshot types and the host collaborator interface.
//!
//! The host's plugin lifecycle is a live, externally mutated registry. The
//! engine never reads it piecemeal: it captures a [`PluginSnapshot`] value in
//! one boundary round-trip per potential rebuild and hands that to the
//! builder, so the invalidation contract stays explicit.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One currently activated plugin, as reported by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivatedPlugin {
    /// Human-readable plugin name shown to users.
    pub display_name: String,
    /// Module/source identity correlating the plugin with its registered
    /// handlers. Plugins without one cannot be correlated and contribute no
    /// commands.
    pub module_identity: Option<String>,
}

impl ActivatedPlugin {
    /// A plugin with a resolvable module identity.
    pub fn new(display_name: &str, module_identity: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            module_identity: Some(module_identity.to_string()),
        }
    }

    /// A plugin the host could not correlate to a module.
    pub fn unresolved(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            module_identity: None,
        }
    }
}

/// A single-command event filter: the handler answers exactly one command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandFilter {
    /// The command name, without sentinel prefix.
    pub name: String,
}

/// A command-group event filter: the handler answers a whole group, exposed
/// under the group's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandGroupFilter {
    /// The group name, without sentinel prefix.
    pub name: String,
}

/// One handler registration inside a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerDescriptor {
    /// Module identity of the plugin this handler belongs to.
    pub module_identity: String,
    /// Description text, if the handler declared one.
    pub description: Option<String>,
    /// Single-command filter, if declared. Takes precedence over
    /// [`Self::group_filter`] when both are present.
    pub command_filter: Option<CommandFilter>,
    /// Command-group filter, if declared.
    pub group_filter: Option<CommandGroupFilter>,
    /// Alias names, without sentinel prefix.
    ///
    /// Order contract: hosts must present aliases in a deterministic order
    /// (declaration order where available, otherwise one fixed ordering of
    /// their choosing). The index preserves exactly the order given here.
    pub aliases: Vec<String>,
}

/// The command a handler contributes, resolved from its filters.
///
/// A handler contributes at most one command name: the single-command filter
/// wins over the group filter, mirroring registration precedence in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerCommand<'a> {
    /// From a [`CommandFilter`].
    Single(&'a str),
    /// From a [`CommandGroupFilter`].
    Group(&'a str),
}

impl HandlerCommand<'_> {
    /// The contributed command name, whichever filter it came from.
    pub const fn name(&self) -> &str {
        match *self {
            Self::Single(name) | Self::Group(name) => name,
        }
    }
}

impl HandlerDescriptor {
    /// Handler answering a single command.
    pub fn command(module_identity: &str, name: &str) -> Self {
        Self {
            module_identity: module_identity.to_string(),
            description: None,
            command_filter: Some(CommandFilter {
                name: name.to_string(),
            }),
            group_filter: None,
            aliases: Vec::new(),
        }
    }

    /// Handler answering a command group.
    pub fn group(module_identity: &str, name: &str) -> Self {
        Self {
            module_identity: module_identity.to_string(),
            description: None,
            command_filter: None,
            group_filter: Some(CommandGroupFilter {
                name: name.to_string(),
            }),
            aliases: Vec::new(),
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Attach aliases, in the order they should be surfaced.
    pub fn with_aliases(mut self, aliases: Vec<&str>) -> Self {
        self.aliases = aliases.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Resolve which command, if any, this handler contributes.
    pub fn resolved_command(&self) -> Option<HandlerCommand<'_>> {
        if let Some(filter) = &self.command_filter {
            return Some(HandlerCommand::Single(&filter.name));
        }
        self.group_filter
            .as_ref()
            .map(|filter| HandlerCommand::Group(&filter.name))
    }
}

/// Read-only capture of the host's plugin registry at one point in time.
#[derive(Debug, Clone, Default)]
pub struct PluginSnapshot {
    /// Currently activated plugins.
    pub plugins: Vec<ActivatedPlugin>,
    /// The full handler registry, across all plugins.
    pub handlers: Vec<HandlerDescriptor>,
}

/// Interface to the host's plugin-lifecycle manager.
///
/// Both calls may suspend at the host boundary; the engine treats them as
/// cooperative and serializes every capture behind its cache mutex. Failures
/// are surfaced as `anyhow::Error` so hosts can forward whatever their
/// registry reports - the engine logs and degrades rather than propagating.
#[async_trait]
pub trait PluginHost: Send + Sync {
    /// All currently activated plugins.
    async fn activated_plugins(&self) -> anyhow::Result<Vec<ActivatedPlugin>>;

    /// The full handler registry across all loaded modules.
    async fn registered_handlers(&self) -> anyhow::Result<Vec<HandlerDescriptor>>;
}
