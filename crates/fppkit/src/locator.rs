//! Locating and unpacking cached release artifacts.

use crate::error::{Error, Result};
use crate::platform::Platform;
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Archive;

/// Look for the platform artifact in `cache_dir` and unpack it into `dest`.
///
/// Returns the unpacked tools directory on a hit and `None` when no
/// artifact of the expected name is present — absence is not an error, it
/// just moves the caller to the next acquisition tier. Cached artifacts are
/// treated as authoritative: no freshness or checksum validation happens
/// here, and extraction overwrites freely (last extraction wins).
pub fn prepare(cache_dir: &Path, dest: &Path, platform: &Platform) -> Result<Option<PathBuf>> {
    let artifact = cache_dir.join(platform.artifact_name());
    if !artifact.exists() {
        return Ok(None);
    }

    log::info!("unpacking {}", artifact.display());
    let file = File::open(&artifact).map_err(|e| Error::io(&artifact, e))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.unpack(dest).map_err(|e| Error::Extract {
        path: artifact.clone(),
        message: e.to_string(),
    })?;

    Ok(Some(dest.join(platform.artifact_stem())))
}
