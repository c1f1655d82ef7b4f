// ABOUTME: Local cache of downloaded sqldef binaries keyed by tool name
// ABOUTME: A present executable file is a hit; anything else triggers a download

use crate::error::Result;
use crate::platform::Platform;
use crate::release::{extract_entry, HttpClient, ReleaseFetcher};
use crate::tool::Tool;
use indicatif::ProgressBar;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

/// Binaries live directly under `bin_dir`, one file per tool
pub struct BinaryCache<C> {
    bin_dir: PathBuf,
    fetcher: ReleaseFetcher<C>,
    platform: Option<Platform>,
}

impl<C: HttpClient> BinaryCache<C> {
    pub fn new(bin_dir: impl Into<PathBuf>, fetcher: ReleaseFetcher<C>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
            fetcher,
            platform: None,
        }
    }

    /// Download assets for `platform` instead of the running host
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    pub fn fetcher(&self) -> &ReleaseFetcher<C> {
        &self.fetcher
    }

    /// Where `tool` is (or will be) cached
    pub fn path_for(&self, tool: Tool) -> PathBuf {
        self.bin_dir.join(tool.as_str())
    }

    /// Return a runnable path for `tool`, downloading it on a cache miss
    ///
    /// A cache hit is any executable file at [`path_for`](Self::path_for); its
    /// content and version are never checked.
    pub async fn resolve(&self, tool: Tool) -> Result<PathBuf> {
        let path = self.path_for(tool);
        if is_executable(&path) {
            tracing::debug!("Using cached {} at {}", tool, path.display());
            return Ok(path);
        }

        tracing::info!(
            "Downloading '{}' under '{}'...",
            tool,
            self.bin_dir.display()
        );
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("Downloading {}", tool));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.download(tool, &path).await;
        spinner.finish_and_clear();
        result?;

        tracing::info!("✓ Installed {} at {}", tool, path.display());
        Ok(path)
    }

    async fn download(&self, tool: Tool, path: &Path) -> Result<()> {
        let platform = match &self.platform {
            Some(platform) => platform.clone(),
            None => Platform::detect()?,
        };

        let payload = self.fetcher.fetch(tool, &platform).await?;
        let binary = extract_entry(&payload, tool.as_str())?;

        std::fs::create_dir_all(&self.bin_dir)?;
        install_executable(&self.bin_dir, path, &binary)
    }
}

/// Write `bytes` next to `path`, mark executable, then move into place
fn install_executable(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    set_executable(file.path())?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
