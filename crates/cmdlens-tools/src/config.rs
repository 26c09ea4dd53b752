//! Tool-layer configuration: the display prefix.
//!
//! The host owns configuration loading; this crate only receives the single
//! pass-through value it needs. The substitution is purely cosmetic and
//! happens on the way out only - internal matching always uses the sentinel.

use cmdlens_core::SENTINEL_PREFIX;
use serde::{Deserialize, Serialize};

/// Configuration handed over by the host when the tool layer is set up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Prefix shown in place of the internal sentinel on every command name
    /// crossing the tool boundary. Defaults to the sentinel itself.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

fn default_command_prefix() -> String {
    SENTINEL_PREFIX.to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
        }
    }
}

impl ToolConfig {
    /// Config with a custom display prefix.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            command_prefix: prefix.to_string(),
        }
    }

    /// Rewrite a sentinel-prefixed command name for display. Names without
    /// the sentinel pass through unchanged.
    pub fn display_command(&self, command: &str) -> String {
        command.strip_prefix(SENTINEL_PREFIX).map_or_else(
            || command.to_string(),
            |rest| format!("{}{rest}", self.command_prefix),
        )
    }
}
