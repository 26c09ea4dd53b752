//! Query engine: cached index, invalidation policy, and query operations.
//!
//! Every public query goes through [`QueryEngine::index`], which re-derives
//! the activated-plugin count from the host on each call and only rebuilds
//! the index when the count changed or the cache is empty. The whole
//! read-count/compare/rebuild/publish sequence runs under one mutex, held
//! across the host boundary await, so concurrent triggers coalesce into a
//! single rebuild and no query ever observes a partially built index.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::builder;
use crate::snapshot::{PluginHost, PluginSnapshot};
use crate::types::{CommandIndex, CommandRecord, SENTINEL_PREFIX, normalize_name};

/// Cached index plus the plugin count it was built from, replaced as a unit.
struct CacheState {
    /// Activated-plugin count at the last rebuild. `None` is the sentinel
    /// that forces the next call to rebuild regardless of the live count.
    last_count: Option<usize>,
    index: Option<Arc<CommandIndex>>,
}

/// Outcome of a detail lookup.
#[derive(Debug, Clone)]
pub enum Detail {
    /// The name resolved to a record.
    Found {
        /// The matched record (real or alias).
        record: CommandRecord,
        /// Up to 3 other real commands from the same plugin, in index order.
        related: Vec<String>,
    },
    /// No record under that name; `suggestions` is a limit-3 search over the
    /// raw input.
    NotFound {
        /// Closest matches, possibly empty.
        suggestions: Vec<CommandRecord>,
    },
}

/// One plugin and its real (non-alias) commands.
#[derive(Debug, Clone)]
pub struct PluginGroup {
    /// Plugin display name.
    pub name: String,
    /// Real commands in index order.
    pub commands: Vec<CommandRecord>,
}

/// Outcome of a filtered plugin lookup.
#[derive(Debug, Clone)]
pub enum PluginLookup {
    /// First plugin whose display name contains the filter.
    Matched(PluginGroup),
    /// Nothing matched; carries the sorted list of plugins that do exist.
    NoMatch {
        /// All plugin display names, sorted.
        available: Vec<String>,
    },
}

/// The query engine. One instance per host, shared behind an `Arc`.
pub struct QueryEngine {
    host: Arc<dyn PluginHost>,
    state: Mutex<CacheState>,
    rebuilds: AtomicU64,
}

impl QueryEngine {
    /// Create an engine over the given host collaborator. No index is built
    /// until the first query.
    pub fn new(host: Arc<dyn PluginHost>) -> Self {
        Self {
            host,
            state: Mutex::new(CacheState {
                last_count: None,
                index: None,
            }),
            rebuilds: AtomicU64::new(0),
        }
    }

    /// The current index, rebuilding if the activated-plugin count changed.
    ///
    /// A failing host collaborator is logged and degrades to a fresh empty
    /// index; the cache is left untouched so the next call retries.
    pub async fn index(&self) -> Arc<CommandIndex> {
        let mut state = self.state.lock().await;

        let plugins = match self.host.activated_plugins().await {
            Ok(plugins) => plugins,
            Err(err) => {
                error!(error = %err, "failed to list activated plugins, serving empty index");
                return Arc::new(CommandIndex::new());
            },
        };
        let count = plugins.len();

        if let (Some(last), Some(index)) = (state.last_count, state.index.as_ref()) {
            if last == count {
                debug!(count, "command index cache hit");
                return Arc::clone(index);
            }
        }

        let handlers = match self.host.registered_handlers().await {
            Ok(handlers) => handlers,
            Err(err) => {
                error!(error = %err, "failed to list handlers, serving empty index");
                return Arc::new(CommandIndex::new());
            },
        };

        let snapshot = PluginSnapshot { plugins, handlers };
        let index = Arc::new(builder::build(&snapshot));
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
        info!(
            plugins = count,
            entries = index.len(),
            "command index rebuilt"
        );

        state.last_count = Some(count);
        state.index = Some(Arc::clone(&index));
        index
    }

    /// Drop the cached index and reset the count sentinel, so the very next
    /// query rebuilds even if the plugin count is unchanged. Returns the
    /// entry count of the discarded index (0 when nothing was cached).
    pub async fn invalidate(&self) -> usize {
        let mut state = self.state.lock().await;
        let previous = state.index.as_ref().map_or(0, |index| index.len());
        state.index = None;
        state.last_count = None;
        info!(previous, "command index cache invalidated");
        previous
    }

    /// How many times the index has been rebuilt since engine creation.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds.load(Ordering::Relaxed)
    }

    /// Tiered keyword search, at most `limit` records.
    ///
    /// Tier order: exact name, name substring, description substring, plugin
    /// name substring. Later tiers never evict or reorder earlier matches,
    /// and a record never appears twice. A keyword that is empty after
    /// trimming yields no results.
    pub async fn search(&self, keyword: &str, limit: usize) -> Vec<CommandRecord> {
        let index = self.index().await;
        search_index(&index, keyword, limit)
    }

    /// Exact-name detail lookup with related commands or suggestions.
    ///
    /// The name is normalized by ensuring the sentinel prefix only; lookup is
    /// case-sensitive, matching how names were stored.
    pub async fn detail(&self, command_name: &str) -> Detail {
        let index = self.index().await;
        let normalized = normalize_name(command_name);

        let Some(record) = index.get(&normalized) else {
            debug!(command = %normalized, "detail miss, searching for suggestions");
            return Detail::NotFound {
                suggestions: search_index(&index, command_name, SUGGESTION_LIMIT),
            };
        };

        let related = index
            .records()
            .filter(|r| !r.is_alias())
            .filter(|r| r.plugin == record.plugin && r.name != normalized)
            .map(|r| r.name.clone())
            .take(RELATED_LIMIT)
            .collect();

        Detail::Found {
            record: record.clone(),
            related,
        }
    }

    /// All plugin display names, sorted.
    pub async fn plugin_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups().await.into_keys().collect();
        names.sort();
        names
    }

    /// First plugin whose display name contains `filter`, case-insensitively,
    /// in grouping iteration order. A simple tie-break, not a ranking.
    pub async fn plugin_commands(&self, filter: &str) -> PluginLookup {
        let groups = self.groups().await;
        let needle = filter.to_lowercase();

        for (name, commands) in &groups {
            if name.to_lowercase().contains(&needle) {
                return PluginLookup::Matched(PluginGroup {
                    name: name.clone(),
                    commands: commands.clone(),
                });
            }
        }

        let mut available: Vec<String> = groups.into_keys().collect();
        available.sort();
        PluginLookup::NoMatch { available }
    }

    /// Bucket every real record by owning plugin in one index pass.
    async fn groups(&self) -> IndexMap<String, Vec<CommandRecord>> {
        let index = self.index().await;
        let mut groups: IndexMap<String, Vec<CommandRecord>> = IndexMap::new();
        for record in index.records().filter(|r| !r.is_alias()) {
            groups
                .entry(record.plugin.clone())
                .or_default()
                .push(record.clone());
        }
        groups
    }
}

/// Cap on detail-lookup suggestion lists.
const SUGGESTION_LIMIT: usize = 3;
/// Cap on same-plugin related commands in detail output.
const RELATED_LIMIT: usize = 3;

/// Result-set membership key: canonical name plus alias flag. Records are
/// immutable value types compared by name, so no structural equality needed.
fn seen_key(record: &CommandRecord) -> (String, bool) {
    (record.name.clone(), record.is_alias())
}

fn search_index(index: &CommandIndex, keyword: &str, limit: usize) -> Vec<CommandRecord> {
    let mut needle = keyword.trim().to_lowercase();
    if let Some(stripped) = needle.strip_prefix(SENTINEL_PREFIX) {
        needle = stripped.to_string();
    }
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut results: Vec<CommandRecord> = Vec::new();
    let mut seen: HashSet<(String, bool)> = HashSet::new();

    // Tier 1: exact name.
    let exact = format!("{SENTINEL_PREFIX}{needle}");
    if let Some(record) = index.get(&exact) {
        seen.insert(seen_key(record));
        results.push(record.clone());
    }

    // Tier 2: command name substring. Scans the whole index; the final
    // truncation enforces the limit.
    if results.len() < limit {
        for record in index.records() {
            if record.name.to_lowercase().contains(&needle) && seen.insert(seen_key(record)) {
                results.push(record.clone());
            }
        }
    }

    // Tier 3: description substring, stopping the instant the limit is hit.
    if results.len() < limit {
        for record in index.records() {
            if record.description.to_lowercase().contains(&needle) && seen.insert(seen_key(record))
            {
                results.push(record.clone());
            }
            if results.len() >= limit {
                break;
            }
        }
    }

    // Tier 4: owning plugin name substring.
    if results.len() < limit {
        for record in index.records() {
            if record.plugin.to_lowercase().contains(&needle) && seen.insert(seen_key(record)) {
                results.push(record.clone());
            }
            if results.len() >= limit {
                break;
            }
        }
    }

    results.truncate(limit);
    results
}
