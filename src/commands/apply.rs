// ABOUTME: Apply command that migrates a database to a desired schema file
// ABOUTME: Previews the change and asks for confirmation unless told not to

use crate::config::Settings;
use crate::schema::{self, ConnectionParams};
use crate::tool::Tool;
use anyhow::{bail, Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::Path;

/// Apply `schema_path` to the database described by `params`
///
/// Unless `skip_confirmation` is set, a dry run is shown first and the user is
/// asked before any DDL is executed.
///
/// # Errors
///
/// This function will return an error if:
/// - The sqldef binary cannot be downloaded
/// - The dry run or the apply exits non-zero
/// - The user declines the confirmation prompt
pub async fn apply(
    settings: &Settings,
    tool: Tool,
    params: &ConnectionParams,
    schema_path: &Path,
    skip_confirmation: bool,
) -> Result<()> {
    let cache = super::build_cache(settings)?;

    if !skip_confirmation {
        tracing::info!("Previewing changes before apply...");
        schema::dry_run(&cache, tool, params, schema_path)
            .await
            .context("Dry run before apply failed")?;

        if !confirm_apply(&params.database)? {
            bail!("Apply cancelled by user");
        }
    }

    schema::apply(&cache, tool, params, schema_path)
        .await
        .with_context(|| {
            format!(
                "Failed to apply {} to '{}'",
                schema_path.display(),
                params.database
            )
        })
}

fn confirm_apply(database: &str) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Apply these changes to '{}'?", database))
        .default(false)
        .interact()
        .context("Failed to get confirmation")
}
