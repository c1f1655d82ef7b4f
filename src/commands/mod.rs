// ABOUTME: Command implementations behind each CLI subcommand
// ABOUTME: Exports export, dry_run, apply, and install commands

pub mod apply;
pub mod dry_run;
pub mod export;
pub mod install;

pub use apply::apply;
pub use dry_run::dry_run;
pub use export::export;
pub use install::install;

use crate::cache::BinaryCache;
use crate::config::Settings;
use crate::release::{ReleaseFetcher, ReqwestClient};
use anyhow::{Context, Result};

/// Binary cache backed by the real GitHub release host
pub fn build_cache(settings: &Settings) -> Result<BinaryCache<ReqwestClient>> {
    let client = ReqwestClient::new().context("Failed to build HTTP client")?;
    let fetcher =
        ReleaseFetcher::new(client).with_retries(settings.retries, settings.retry_delay);
    Ok(BinaryCache::new(settings.bin_dir.clone(), fetcher))
}
