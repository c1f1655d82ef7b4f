// ABOUTME: Export command that writes a database's current schema to a file
// ABOUTME: Downloads the sqldef binary first if it is not cached

use crate::config::Settings;
use crate::schema::{self, ConnectionParams};
use crate::tool::Tool;
use anyhow::{Context, Result};
use std::path::Path;

/// Export the current schema of `params.database` to `output_path`
///
/// Downloads the sqldef binary into `settings.bin_dir` first if it is not
/// already there.
///
/// # Arguments
///
/// * `settings` - Cache directory and retry policy
/// * `tool` - Which sqldef flavour to run
/// * `params` - Connection details for the source database
/// * `output_path` - File that receives the exported schema
///
/// # Errors
///
/// This function will return an error if:
/// - The sqldef binary cannot be downloaded or extracted
/// - sqldef cannot be started or exits non-zero (no file is written)
/// - The output file cannot be written
pub async fn export(
    settings: &Settings,
    tool: Tool,
    params: &ConnectionParams,
    output_path: &Path,
) -> Result<()> {
    let cache = super::build_cache(settings)?;
    schema::export(&cache, tool, params, output_path)
        .await
        .with_context(|| {
            format!(
                "Failed to export schema of '{}' with {}",
                params.database, tool
            )
        })
}
