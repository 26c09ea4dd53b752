//! # cmdlens-tools
//!
//! The agent-facing side of cmdlens: JSON tool contracts over the
//! `cmdlens-core` query engine, plus the plain-text rendering used by the
//! host's thin chat surface.
//!
//! Four tools are exposed, each with a typed handler and a `run` boundary
//! that accepts raw JSON parameters and never fails:
//!
//! - [`tools::search`] - tiered keyword search (correct a mistyped command,
//!   find a feature)
//! - [`tools::detail`] - exact-name lookup with related commands and
//!   miss suggestions
//! - [`tools::plugins`] - plugin overview or one plugin's command list
//! - [`tools::refresh`] - manual cache invalidation with statistics
//!
//! Every command name crossing the tool boundary has the internal sentinel
//! prefix replaced by the configured display prefix ([`ToolConfig`]), on the
//! way out only.

/// Display-prefix configuration
pub mod config;
/// Tool error types and the structured-failure boundary
pub mod error;
/// Plain-text rendering for the chat surface
pub mod render;
/// The query tools
pub mod tools;

pub use config::ToolConfig;
pub use error::{ToolError, ToolResult};

/// Install a `tracing` subscriber writing to stderr.
///
/// Hosts embedding the tool layer call this once at startup; hosts with
/// their own subscriber skip it.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for the tool tests: a static host double and two
    //! pre-wired engines.

    use std::sync::Arc;

    use async_trait::async_trait;
    use cmdlens_core::{ActivatedPlugin, HandlerDescriptor, PluginHost, QueryEngine};

    struct StaticHost {
        plugins: Vec<ActivatedPlugin>,
        handlers: Vec<HandlerDescriptor>,
    }

    #[async_trait]
    impl PluginHost for StaticHost {
        async fn activated_plugins(&self) -> anyhow::Result<Vec<ActivatedPlugin>> {
            Ok(self.plugins.clone())
        }

        async fn registered_handlers(&self) -> anyhow::Result<Vec<HandlerDescriptor>> {
            Ok(self.handlers.clone())
        }
    }

    /// Engine over two game plugins: 5 real commands, 2 aliases.
    pub fn game_engine() -> QueryEngine {
        QueryEngine::new(Arc::new(StaticHost {
            plugins: vec![
                ActivatedPlugin::new("钓鱼游戏插件", "pkg.fishing"),
                ActivatedPlugin::new("抽奖插件", "pkg.lottery"),
            ],
            handlers: vec![
                HandlerDescriptor::command("pkg.fishing", "钓鱼")
                    .with_description("开始钓鱼游戏")
                    .with_aliases(vec!["fishing", "fish"]),
                HandlerDescriptor::command("pkg.fishing", "卖鱼").with_description("出售渔获"),
                HandlerDescriptor::command("pkg.fishing", "鱼塘").with_description("查看鱼塘"),
                HandlerDescriptor::command("pkg.fishing", "图鉴").with_description("钓鱼图鉴"),
                HandlerDescriptor::command("pkg.lottery", "抽奖").with_description("参与抽奖"),
            ],
        }))
    }

    /// Engine over a host with no activated plugins at all.
    pub fn empty_engine() -> QueryEngine {
        QueryEngine::new(Arc::new(StaticHost {
            plugins: Vec::new(),
            handlers: Vec::new(),
        }))
    }
}
