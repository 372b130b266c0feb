//! # fppkit
//!
//! Pure Rust library for resolving and installing the FPP tool suite.
//!
//! This crate is the engine behind the `fpp-install` hook: it resolves the
//! tools version handed over by an outer installer (or the environment),
//! then acquires a matching toolchain through a three-tier fallback:
//!
//! 1. a local artifact cache (`FPP_DOWNLOAD_CACHE`),
//! 2. the upstream GitHub release for the resolved version,
//! 3. a source build via `git`, `sh`, `java`, and `sbt`.
//!
//! ## Example
//!
//! ```no_run
//! use fppkit::{InstallConfig, Installer};
//!
//! let installer = Installer::new(InstallConfig::from_env());
//! let installation = installer.run().expect("installation failed");
//! for entry in installation.entries() {
//!     println!("{}", entry.display());
//! }
//! // scratch state is removed when `installation` drops
//! ```
//!
//! Expected absences (no cached artifact, no prebuilt release for this
//! platform) fall through to the next tier; everything else is an
//! [`Error`] the embedding process should treat as fatal.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod acquire;
pub mod config;
pub mod error;
pub mod handoff;
pub mod locator;
pub mod platform;
pub mod version;
pub mod workdir;

pub use config::InstallConfig;
pub use error::{Error, Result};
pub use platform::Platform;

use std::fs;
use std::path::{Path, PathBuf};
use workdir::CleanupGuard;

/// High-level driver for the install pipeline.
///
/// # Example
///
/// ```no_run
/// use fppkit::{InstallConfig, Installer};
///
/// let installer = Installer::new(InstallConfig::from_env());
/// let version = installer.resolve_version().expect("no version configured");
/// println!("would install FPP tools {version}");
/// ```
pub struct Installer {
    config: InstallConfig,
}

impl Installer {
    /// Create an installer over a fixed configuration.
    #[must_use]
    pub fn new(config: InstallConfig) -> Self {
        Self { config }
    }

    /// Borrow the configuration.
    #[must_use]
    pub fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Resolve the tools version without installing anything.
    pub fn resolve_version(&self) -> Result<String> {
        version::resolve(&self.config)
    }

    /// Run the full pipeline: resolve the version, acquire the tools, and
    /// enumerate what was installed.
    ///
    /// The returned [`Installation`] owns the scratch state: the working
    /// directory and the transient version record are removed when it is
    /// dropped. On error the same cleanup runs before this function
    /// returns.
    pub fn run(&self) -> Result<Installation> {
        let mut guard = CleanupGuard::new();
        guard.register(&self.config.version_file);
        guard.register(&self.config.working_dir);

        let tools_version = version::resolve(&self.config)?;
        let package_version = version::package_version(&tools_version);
        let platform = Platform::detect();

        fs::create_dir_all(&self.config.working_dir)
            .map_err(|e| Error::io(&self.config.working_dir, e))?;

        let tools_dir = self.stage(&platform, &tools_version)?;
        let entries = list_entries(&tools_dir)?;

        Ok(Installation {
            tools_version,
            package_version,
            tools_dir,
            entries,
            guard,
        })
    }

    /// Reuse a previously staged suite when the working directory already
    /// holds one, otherwise run the acquisition chain.
    fn stage(&self, platform: &Platform, tools_version: &str) -> Result<PathBuf> {
        let working_dir = &self.config.working_dir;

        if !dir_has_entries(working_dir)? {
            return acquire::acquire(&self.config, platform, tools_version);
        }

        let extracted = working_dir.join(platform.artifact_stem());
        if dir_has_entries(&extracted)? {
            return Ok(extracted);
        }
        Ok(working_dir.clone())
    }
}

/// A completed installation and the scoped scratch state behind it.
///
/// Consume [`entries`](Self::entries) (or copy them out) before dropping:
/// dropping removes the working directory. Hosts that want the files left
/// in place call [`keep`](Self::keep) instead.
#[derive(Debug)]
pub struct Installation {
    tools_version: String,
    package_version: String,
    tools_dir: PathBuf,
    entries: Vec<PathBuf>,
    guard: CleanupGuard,
}

impl Installation {
    /// Tools version that was installed.
    #[must_use]
    pub fn tools_version(&self) -> &str {
        &self.tools_version
    }

    /// Package version derived from the tools version.
    #[must_use]
    pub fn package_version(&self) -> &str {
        &self.package_version
    }

    /// Directory holding the installed tool suite.
    #[must_use]
    pub fn tools_dir(&self) -> &Path {
        &self.tools_dir
    }

    /// Entries directly under the tools directory, sorted.
    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Disarm cleanup and return the tools directory, leaving the working
    /// directory and version record in place.
    #[must_use]
    pub fn keep(mut self) -> PathBuf {
        self.guard.keep();
        self.tools_dir.clone()
    }
}

/// Whether `path` is a directory with at least one entry.
fn dir_has_entries(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    Ok(entries.next().is_some())
}

/// Sorted entries directly under `dir`: the public result of a run.
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn test_config(root: &Path) -> InstallConfig {
        InstallConfig {
            env_version: Some("v1.0.0".to_string()),
            download_cache: None,
            repo_url: "http://127.0.0.1:9".to_string(),
            version_file: root.join("fprime_versions.json"),
            working_dir: root.join("__FPP_WORKING_DIR__"),
            packaged_version: None,
            trust_version_file: false,
        }
    }

    fn write_archive(path: &Path, root: &str, names: &[&str]) {
        let file = File::create(path).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for name in names {
            let data = b"#!/bin/sh\n";
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder
                .append_data(&mut header, format!("{root}/{name}"), &data[..])
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn test_run_from_external_cache() {
        let root = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();
        let platform = Platform::detect();

        write_archive(
            &cache.path().join(platform.artifact_name()),
            &platform.artifact_stem(),
            &["fpp-check", "fpp-to-xml"],
        );

        let mut config = test_config(root.path());
        config.download_cache = Some(cache.path().to_path_buf());
        let working_dir = config.working_dir.clone();

        let installation = Installer::new(config).run().unwrap();
        assert_eq!(installation.tools_version(), "v1.0.0");
        assert_eq!(installation.package_version(), "v1.0.0");
        assert_eq!(installation.entries().len(), 2);
        assert!(installation.entries().iter().all(|p| p.exists()));

        drop(installation);
        assert!(!working_dir.exists());
    }

    #[test]
    fn test_run_reuses_staged_working_dir() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        let platform = Platform::detect();

        // A previous run already extracted the suite; no acquisition may
        // happen (the repo URL would fail fatally if contacted).
        let extracted = config.working_dir.join(platform.artifact_stem());
        fs::create_dir_all(&extracted).unwrap();
        fs::write(extracted.join("fpp-check"), "#!/bin/sh\n").unwrap();

        let installation = Installer::new(config).run().unwrap();
        assert_eq!(installation.tools_dir(), extracted.as_path());
        assert_eq!(installation.entries().len(), 1);
    }

    #[test]
    fn test_run_reuses_built_working_dir() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());

        // A source build installed straight into the working directory.
        fs::create_dir_all(&config.working_dir).unwrap();
        fs::write(config.working_dir.join("fpp-check"), "#!/bin/sh\n").unwrap();

        let installation = Installer::new(config.clone()).run().unwrap();
        assert_eq!(installation.tools_dir(), config.working_dir.as_path());
    }

    #[test]
    fn test_run_failure_still_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        let working_dir = config.working_dir.clone();
        let version_file = config.version_file.clone();
        fs::write(&version_file, "{not json").unwrap();

        // Empty working dir, unreachable repo: the download tier fails
        // fatally. The scratch state must be gone regardless.
        let err = Installer::new(config).run().unwrap_err();
        assert!(matches!(err, Error::Download { .. }));
        assert!(!working_dir.exists());
        assert!(!version_file.exists());
    }

    #[test]
    fn test_keep_leaves_tools_in_place() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());

        fs::create_dir_all(&config.working_dir).unwrap();
        fs::write(config.working_dir.join("fpp-check"), "#!/bin/sh\n").unwrap();

        let installation = Installer::new(config.clone()).run().unwrap();
        let tools_dir = installation.keep();
        assert!(tools_dir.join("fpp-check").exists());
        assert!(config.working_dir.exists());
    }

    #[test]
    fn test_run_without_version_fails() {
        let root = tempfile::tempdir().unwrap();
        let mut config = test_config(root.path());
        config.env_version = None;

        let err = Installer::new(config).run().unwrap_err();
        assert!(matches!(err, Error::VersionNotConfigured { .. }));
    }

    #[test]
    fn test_resolve_version_does_not_install() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        let working_dir = config.working_dir.clone();

        let installer = Installer::new(config);
        let version = installer.resolve_version().unwrap();
        assert_eq!(version, "v1.0.0");
        assert_eq!(installer.config().working_dir, working_dir);
        assert!(!working_dir.exists());
    }
}
