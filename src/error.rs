// ABOUTME: Error taxonomy for binary resolution and schema commands
// ABOUTME: Every failure is fatal to the calling operation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqldefError {
    /// Host CPU architecture has no published sqldef release.
    #[error("Unsupported architecture: {0} (supported: x86_64, aarch64)")]
    UnsupportedArchitecture(String),

    #[error("Expected '{url}' to return {expected}, but got {actual}: {body}")]
    UnexpectedStatus {
        url: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("'{url}' returned {status} without a Location header")]
    MissingRedirect { url: String, status: u16 },

    /// The release archive did not contain the requested binary.
    #[error("'{0}' was not found in the archive")]
    EntryNotFound(String),

    #[error("Failed to execute '{command}': {reason}")]
    ExecutionFailed { command: String, reason: String },

    #[error("Unexpected sqldef command: {0} (expected one of: mysqldef, psqldef, sqlite3def)")]
    UnknownCommand(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SqldefError {
    /// Transport failures are the only errors worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, SqldefError::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, SqldefError>;
