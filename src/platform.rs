// ABOUTME: Maps the host OS and CPU to sqldef's release asset naming
// ABOUTME: Only amd64 and arm64 builds are recognized

use crate::error::{Result, SqldefError};

/// OS/architecture pair as it appears in release asset names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: &'static str,
}

impl Platform {
    /// Resolve from `uname`-style values (sysname, machine)
    pub fn from_uname(sysname: &str, machine: &str) -> Result<Self> {
        let arch = match machine {
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            other => return Err(SqldefError::UnsupportedArchitecture(other.to_string())),
        };

        Ok(Self {
            os: sysname.to_lowercase(),
            arch,
        })
    }

    /// Resolve for the running host
    pub fn detect() -> Result<Self> {
        Self::from_uname(host_sysname(), std::env::consts::ARCH)
    }
}

/// What `uname -s` reports on this host
fn host_sysname() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    }
}
