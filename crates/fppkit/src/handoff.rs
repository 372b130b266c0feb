//! Transient version handoff from the outer installer.
//!
//! When the larger packaging system installs this hook, it writes a small
//! JSON record into the temp directory naming the tools version it wants,
//! stamped with its own process id. The record is consumed once per run and
//! removed at exit (see [`crate::workdir::CleanupGuard`]). The key names in
//! the record are an interop contract with the outer installer.

use crate::config::TOOLS_VERSION_VAR;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Record written by the outer installer before it spawns this process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Tools version the outer installer wants installed.
    #[serde(rename = "FPP_TOOLS_VERSION")]
    pub tools_version: String,
    /// Process id of the installer that wrote the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_ppid: Option<u32>,
}

impl VersionRecord {
    /// Create a record for a child install process to pick up.
    #[must_use]
    pub fn new(tools_version: impl Into<String>, setup_ppid: u32) -> Self {
        Self {
            tools_version: tools_version.into(),
            setup_ppid: Some(setup_ppid),
        }
    }

    /// Write the record to `path` as JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)
            .map_err(|e| Error::io(path, std::io::Error::other(e)))?;
        fs::write(path, json).map_err(|e| Error::io(path, e))
    }
}

/// Current parent process id, used to validate record provenance.
fn parent_id() -> Option<u32> {
    #[cfg(unix)]
    {
        Some(std::os::unix::process::parent_id())
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Read the tools version from a transient record, if one is usable.
///
/// A record is usable when its `setup_ppid` matches our parent process —
/// meaning the same installer tree that wrote it also spawned us — or when
/// `trust` is set. A missing, malformed, or foreign record is logged and
/// skipped; the caller falls back to the next version source.
pub fn read(path: &Path, trust: bool) -> Option<String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => {
            log::warn!(
                "failed to find {}, skipping as version source",
                path.display()
            );
            return None;
        }
    };

    let record: VersionRecord = match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(_) => {
            log::warn!(
                "{} did not define {TOOLS_VERSION_VAR}, skipping as version source",
                path.display()
            );
            return None;
        }
    };

    let matches_parent =
        matches!((record.setup_ppid, parent_id()), (Some(a), Some(b)) if a == b);
    if trust || matches_parent {
        log::info!(
            "found version {} in {}",
            record.tools_version,
            path.display()
        );
        Some(record.tools_version)
    } else {
        log::warn!(
            "{} contained a non-matching parent process id, skipping as version source",
            path.display()
        );
        None
    }
}
