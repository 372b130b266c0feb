//! Installer configuration.
//!
//! Every knob lives in a single [`InstallConfig`] constructed once at process
//! start ([`InstallConfig::from_env`]) and passed by reference to each
//! component. Nothing else reads the environment, so behavior is fixed at
//! construction time and tests can build configurations directly.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the FPP tools version to install.
pub const TOOLS_VERSION_VAR: &str = "FPP_TOOLS_VERSION";

/// Environment variable pointing at an offline download cache directory.
pub const DOWNLOAD_CACHE_VAR: &str = "FPP_DOWNLOAD_CACHE";

/// Environment variable overriding the upstream repository URL.
pub const TOOLS_REPO_VAR: &str = "FPP_TOOLS_REPO";

/// Default upstream repository hosting FPP releases and sources.
pub const DEFAULT_REPO_URL: &str = "https://github.com/fprime-community/fpp";

/// Name of the transient version record written by the outer installer.
const VERSION_FILE_NAME: &str = "fprime_versions.json";

/// Name of the scratch directory the tool suite is staged into.
const WORKING_DIR_NAME: &str = "__FPP_WORKING_DIR__";

/// Tools version baked into this package at build time, if any.
const PACKAGED_VERSION: Option<&str> = option_env!("FPP_PACKAGED_VERSION");

/// Configuration for one installer run.
///
/// # Example
///
/// ```
/// use fppkit::InstallConfig;
///
/// let config = InstallConfig::from_env()
///     .env_version("v2.1.0")
///     .trust_version_file(true);
/// assert_eq!(config.env_version.as_deref(), Some("v2.1.0"));
/// ```
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Version override captured from the environment.
    pub env_version: Option<String>,
    /// Offline cache directory, if configured.
    pub download_cache: Option<PathBuf>,
    /// Repository URL used for release downloads and source clones.
    pub repo_url: String,
    /// Path of the transient version record.
    pub version_file: PathBuf,
    /// Scratch directory the tool suite is staged into.
    pub working_dir: PathBuf,
    /// Tools version shipped inside the package, if any.
    pub packaged_version: Option<String>,
    /// Accept the version record without checking the creating process.
    pub trust_version_file: bool,
}

impl InstallConfig {
    /// Capture the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let temp = env::temp_dir();
        Self {
            env_version: env::var(TOOLS_VERSION_VAR).ok(),
            download_cache: env::var_os(DOWNLOAD_CACHE_VAR).map(PathBuf::from),
            repo_url: env::var(TOOLS_REPO_VAR).unwrap_or_else(|_| DEFAULT_REPO_URL.to_string()),
            version_file: temp.join(VERSION_FILE_NAME),
            working_dir: temp.join(WORKING_DIR_NAME),
            packaged_version: PACKAGED_VERSION.map(str::to_owned),
            trust_version_file: false,
        }
    }

    /// Set the environment-tier version override.
    #[must_use]
    pub fn env_version(mut self, version: impl Into<String>) -> Self {
        self.env_version = Some(version.into());
        self
    }

    /// Set the offline download cache directory.
    #[must_use]
    pub fn download_cache(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_cache = Some(dir.into());
        self
    }

    /// Set the repository URL.
    #[must_use]
    pub fn repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = url.into();
        self
    }

    /// Set the transient version record path.
    #[must_use]
    pub fn version_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.version_file = path.into();
        self
    }

    /// Set the working directory.
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Set the packaged default version.
    #[must_use]
    pub fn packaged_version(mut self, version: impl Into<String>) -> Self {
        self.packaged_version = Some(version.into());
        self
    }

    /// Set whether to trust the version record unconditionally.
    #[must_use]
    pub fn trust_version_file(mut self, trust: bool) -> Self {
        self.trust_version_file = trust;
        self
    }

    /// Effective cache directory: the configured cache, or the working
    /// directory when none is configured.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        self.download_cache.as_deref().unwrap_or(&self.working_dir)
    }

    /// Whether an explicit cache distinct from the working directory is
    /// configured. An explicit cache means offline installation was asked
    /// for; the network is not consulted in that case.
    #[must_use]
    pub fn has_external_cache(&self) -> bool {
        self.download_cache
            .as_deref()
            .is_some_and(|dir| dir != self.working_dir)
    }
}
