// ABOUTME: Dry-run command that previews the DDL sqldef would execute
// ABOUTME: Never modifies the target database

use crate::config::Settings;
use crate::schema::{self, ConnectionParams};
use crate::tool::Tool;
use anyhow::{Context, Result};
use std::path::Path;

/// Print the DDL sqldef would run to bring `params.database` to `schema_path`
///
/// # Arguments
///
/// * `settings` - Cache directory and retry policy
/// * `tool` - Which sqldef flavour to run
/// * `params` - Connection details for the target database
/// * `schema_path` - Desired schema, fed to sqldef on stdin
///
/// # Errors
///
/// This function will return an error if:
/// - The sqldef binary cannot be downloaded or extracted
/// - The schema file cannot be opened
/// - sqldef cannot be started or exits non-zero
pub async fn dry_run(
    settings: &Settings,
    tool: Tool,
    params: &ConnectionParams,
    schema_path: &Path,
) -> Result<()> {
    let cache = super::build_cache(settings)?;
    schema::dry_run(&cache, tool, params, schema_path)
        .await
        .with_context(|| format!("Dry run of {} failed", schema_path.display()))
}
