// ABOUTME: Wrapper for `sqldef --export` to dump the current database schema
// ABOUTME: Captures stdout and writes it to the requested file on success

use super::args::{ConnectionParams, Mode};
use crate::cache::BinaryCache;
use crate::error::{Result, SqldefError};
use crate::release::HttpClient;
use crate::tool::Tool;
use std::path::Path;
use std::process::{Command, Stdio};

/// Export the schema of `params.database` to `output_path`
///
/// Nothing is written unless sqldef exits successfully.
pub async fn export<C: HttpClient>(
    cache: &BinaryCache<C>,
    tool: Tool,
    params: &ConnectionParams,
    output_path: &Path,
) -> Result<()> {
    let binary = cache.resolve(tool).await?;
    tracing::info!(
        "Exporting schema for database '{}' to {}",
        params.database,
        output_path.display()
    );

    let output = Command::new(&binary)
        .args(params.to_args(Mode::Export))
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| SqldefError::ExecutionFailed {
            command: binary.display().to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(SqldefError::ExecutionFailed {
            command: binary.display().to_string(),
            reason: output.status.to_string(),
        });
    }

    std::fs::write(output_path, &output.stdout)?;

    tracing::info!("✓ Schema exported ({} bytes)", output.stdout.len());
    Ok(())
}
