// ABOUTME: Wrappers for sqldef dry-run and apply against a live database
// ABOUTME: The schema file is fed to sqldef on stdin; output goes to our terminal

use super::args::{ConnectionParams, Mode};
use crate::cache::BinaryCache;
use crate::error::{Result, SqldefError};
use crate::release::HttpClient;
use crate::tool::Tool;
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

/// Show the DDL needed to reach `schema_path` without changing the database
pub async fn dry_run<C: HttpClient>(
    cache: &BinaryCache<C>,
    tool: Tool,
    params: &ConnectionParams,
    schema_path: &Path,
) -> Result<()> {
    let binary = cache.resolve(tool).await?;
    tracing::info!(
        "Dry-running {} against database '{}'",
        schema_path.display(),
        params.database
    );

    run_with_schema(&binary, &params.to_args(Mode::DryRun), schema_path)?;

    tracing::info!("✓ Dry run finished");
    Ok(())
}

/// Migrate `params.database` to the schema in `schema_path`
pub async fn apply<C: HttpClient>(
    cache: &BinaryCache<C>,
    tool: Tool,
    params: &ConnectionParams,
    schema_path: &Path,
) -> Result<()> {
    let binary = cache.resolve(tool).await?;
    tracing::info!(
        "Applying {} to database '{}'",
        schema_path.display(),
        params.database
    );

    run_with_schema(&binary, &params.to_args(Mode::Apply), schema_path)?;

    tracing::info!("✓ Schema applied successfully");
    Ok(())
}

fn run_with_schema(binary: &Path, args: &[String], schema_path: &Path) -> Result<()> {
    let command = binary.display().to_string();

    let schema = File::open(schema_path).map_err(|e| SqldefError::ExecutionFailed {
        command: command.clone(),
        reason: format!("cannot open {}: {}", schema_path.display(), e),
    })?;

    let status = Command::new(binary)
        .args(args)
        .stdin(Stdio::from(schema))
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| SqldefError::ExecutionFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(SqldefError::ExecutionFailed {
            command,
            reason: status.to_string(),
        });
    }

    Ok(())
}
