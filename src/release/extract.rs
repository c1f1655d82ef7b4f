// ABOUTME: Pulls a single named file out of an in-memory tar.gz payload
// ABOUTME: Matches the entry path exactly, with no directory component

use crate::error::{Result, SqldefError};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use tar::Archive;

/// Return the bytes of the archive entry whose path equals `name`
pub fn extract_entry(payload: &[u8], name: &str) -> Result<Vec<u8>> {
    let mut archive = Archive::new(GzDecoder::new(payload));
    let wanted = Path::new(name);

    for entry in archive.entries()? {
        let mut entry = entry?;
        let matches = entry.path()? == wanted;
        if !matches {
            continue;
        }

        // Header sizes come from the network; let the reader grow the buffer
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        return Ok(bytes);
    }

    Err(SqldefError::EntryNotFound(name.to_string()))
}
