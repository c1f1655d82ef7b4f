// ABOUTME: Install command that downloads a sqldef binary into the cache
// ABOUTME: Reuses an existing executable when one is already present

use crate::config::Settings;
use crate::tool::Tool;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Make sure `tool` is available under the configured bin directory
///
/// Returns the path of the executable.
pub async fn install(settings: &Settings, tool: Tool) -> Result<PathBuf> {
    let cache = super::build_cache(settings)?;
    let path = cache
        .resolve(tool)
        .await
        .with_context(|| format!("Failed to install {}", tool))?;

    tracing::info!("✓ {} is available at {}", tool, path.display());
    Ok(path)
}
