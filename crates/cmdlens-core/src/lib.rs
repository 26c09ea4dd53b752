//! # cmdlens-core
//!
//! Core functionality for cmdlens - a searchable, alias-aware index of the
//! commands exposed by a chat-bot host's plugins.
//!
//! The crate exists so a conversational agent can correct mistyped command
//! names, explain usage, and enumerate available functionality without the
//! host exposing that metadata directly. It is organized around two
//! components, consumed in this order:
//!
//! - **Index builder** ([`builder::build`]): turns a [`PluginSnapshot`]
//!   captured from the host into a flat [`CommandIndex`] mapping every
//!   normalized command name - aliases included - to a [`CommandRecord`].
//! - **Query engine** ([`QueryEngine`]): owns the cached index and its
//!   invalidation policy (rebuild when the activated-plugin count changes),
//!   and implements tiered keyword search, exact detail lookup, and
//!   per-plugin grouping on top of it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cmdlens_core::{PluginHost, QueryEngine};
//!
//! # async fn demo(host: Arc<dyn PluginHost>) {
//! let engine = QueryEngine::new(host);
//! let matches = engine.search("钓鱼", 5).await;
//! for record in matches {
//!     println!("{} ({})", record.name, record.plugin);
//! }
//! # }
//! ```
//!
//! ## Degradation
//!
//! Query operations never fail: an unavailable plugin registry is logged and
//! served as an empty index, and a keyword with no matches is an empty
//! result, not an error. Nothing in this crate is fatal to the host process.

/// Command index construction from plugin snapshots
pub mod builder;
/// Cached query engine with count-based invalidation
pub mod engine;
/// Error types and result alias
pub mod error;
/// Plugin snapshot types and the host collaborator trait
pub mod snapshot;
/// Core data types: records and the index
pub mod types;

pub use engine::{Detail, PluginGroup, PluginLookup, QueryEngine};
pub use error::{Error, Result};
pub use snapshot::{
    ActivatedPlugin, CommandFilter, CommandGroupFilter, HandlerCommand, HandlerDescriptor,
    PluginHost, PluginSnapshot,
};
pub use types::{CommandIndex, CommandRecord, NO_DESCRIPTION, SENTINEL_PREFIX, normalize_name};
