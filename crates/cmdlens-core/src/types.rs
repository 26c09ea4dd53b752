//! Core data types for the command index.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel character prepended to every normalized command name.
///
/// Distinct from the display prefix shown to end users, which is substituted
/// at the tool boundary on the way out only.
pub const SENTINEL_PREFIX: char = '/';

/// Placeholder description for handlers registered without one.
pub const NO_DESCRIPTION: &str = "无描述";

/// Ensure a command name carries the sentinel prefix.
///
/// Names already prefixed are returned unchanged; anything else gets the
/// sentinel prepended. No case folding happens here - names are stored
/// case-sensitively.
pub fn normalize_name(raw: &str) -> String {
    if raw.starts_with(SENTINEL_PREFIX) {
        raw.to_string()
    } else {
        format!("{SENTINEL_PREFIX}{raw}")
    }
}

/// One real (non-alias) command, or one alias pointing back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Canonical lookup key, always sentinel-prefixed.
    pub name: String,
    /// Free-text description, [`NO_DESCRIPTION`] when the handler had none.
    pub description: String,
    /// Display name of the owning plugin.
    pub plugin: String,
    /// Alias names in declaration order, each sentinel-prefixed. May be empty.
    pub aliases: Vec<String>,
    /// Present only on alias records: the canonical record's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
}

impl CommandRecord {
    /// Whether this record represents an alias rather than a real command.
    pub const fn is_alias(&self) -> bool {
        self.alias_of.is_some()
    }
}

/// Flat mapping from normalized command name to [`CommandRecord`].
///
/// Built atomically by the index builder and published behind an `Arc`; never
/// mutated in place after publication. Iteration order is insertion order
/// (plugin/handler declaration order), which every "first match wins"
/// tie-break in the query engine relies on.
#[derive(Debug, Clone, Default)]
pub struct CommandIndex {
    entries: IndexMap<String, CommandRecord>,
}

impl CommandIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record keyed by its name. Later insertions with the same name
    /// replace the earlier record but keep its position.
    pub(crate) fn insert(&mut self, record: CommandRecord) {
        self.entries.insert(record.name.clone(), record);
    }

    /// Exact (case-sensitive) lookup by normalized name.
    pub fn get(&self, name: &str) -> Option<&CommandRecord> {
        self.entries.get(name)
    }

    /// All records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &CommandRecord> {
        self.entries.values()
    }

    /// Total number of entries, aliases included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of real (non-alias) commands.
    pub fn real_count(&self) -> usize {
        self.entries.values().filter(|r| !r.is_alias()).count()
    }

    /// Number of alias entries.
    pub fn alias_count(&self) -> usize {
        self.entries.values().filter(|r| r.is_alias()).count()
    }
}
