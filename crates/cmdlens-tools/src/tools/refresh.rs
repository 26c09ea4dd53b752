//! Manual cache refresh tool.
//!
//! Count-based invalidation cannot see a plugin hot-reloaded in place (same
//! plugin count, different commands). This tool is the documented
//! workaround: it drops the cached index, rebuilds immediately, and reports
//! before/after statistics.

use cmdlens_core::QueryEngine;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{ToolError, ToolResult, failure_message};

/// Output from the refresh tool.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshOutput {
    /// Always true.
    pub success: bool,
    /// Rebuild summary.
    pub message: String,
    /// Entry count of the discarded index (0 when nothing was cached).
    pub previous_count: usize,
    /// Entry count of the rebuilt index, aliases included.
    pub new_count: usize,
    /// Real (non-alias) commands in the rebuilt index.
    pub real_count: usize,
    /// Alias entries in the rebuilt index.
    pub alias_count: usize,
}

/// Handle a refresh invocation: invalidate, rebuild, report.
#[tracing::instrument(skip(engine))]
pub async fn handle_refresh(engine: &QueryEngine) -> ToolResult<RefreshOutput> {
    let previous_count = engine.invalidate().await;
    let index = engine.index().await;

    tracing::info!(
        previous = previous_count,
        new = index.len(),
        "command cache refreshed"
    );

    Ok(RefreshOutput {
        success: true,
        message: format!("指令缓存已重建，共 {} 条指令（含别名）", index.len()),
        previous_count,
        new_count: index.len(),
        real_count: index.real_count(),
        alias_count: index.alias_count(),
    })
}

/// JSON boundary for the refresh tool. Never fails.
pub async fn run(engine: &QueryEngine) -> Value {
    match handle_refresh(engine)
        .await
        .and_then(|output| serde_json::to_value(output).map_err(ToolError::from))
    {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "refresh tool failed");
            json!({
                "success": false,
                "message": failure_message("刷新失败", &err),
            })
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::game_engine;

    #[tokio::test]
    async fn test_refresh_reports_statistics() {
        let engine = game_engine();
        // Prime the cache so previous_count is non-zero.
        let primed = engine.index().await;

        let output = handle_refresh(&engine).await.expect("refresh");
        assert!(output.success);
        assert_eq!(output.previous_count, primed.len());
        assert_eq!(output.new_count, primed.len());
        assert_eq!(output.real_count + output.alias_count, output.new_count);
        assert_eq!(output.real_count, 5);
        assert_eq!(output.alias_count, 2);
    }

    #[tokio::test]
    async fn test_refresh_rebuilds_even_with_unchanged_count() {
        let engine = game_engine();
        engine.index().await;
        assert_eq!(engine.rebuild_count(), 1);

        handle_refresh(&engine).await.expect("refresh");
        assert_eq!(engine.rebuild_count(), 2);
    }

    #[tokio::test]
    async fn test_refresh_on_cold_cache_has_zero_previous() {
        let engine = game_engine();
        let output = handle_refresh(&engine).await.expect("refresh");

        assert_eq!(output.previous_count, 0);
        assert!(output.new_count > 0);
    }
}
