//! Host platform naming for release artifacts.
//!
//! Upstream FPP releases are published under names produced by the release
//! CI's own platform probe, so artifact lookup has to speak that convention
//! (`Linux`/`Darwin`/`Windows`, `x86_64`/`arm64`/`aarch64`) rather than
//! Rust's `std::env::consts` spellings. This module owns that mapping.

use std::fmt;

/// Artifact filename prefix used by upstream releases.
pub const ARTIFACT_PREFIX: &str = "native-fpp";

/// Compression suffix of release artifacts.
pub const COMPRESSION_EXT: &str = ".tar.gz";

/// Host platform in the upstream release-naming convention.
///
/// # Example
///
/// ```
/// use fppkit::Platform;
///
/// let platform = Platform::new("Linux", "x86_64");
/// assert_eq!(platform.artifact_name(), "native-fpp-Linux-x86_64.tar.gz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    /// Operating system name (e.g., "Linux", "Darwin", "Windows").
    pub system: String,
    /// Machine architecture (e.g., "x86_64", "arm64", "aarch64").
    pub machine: String,
}

impl Platform {
    /// Create a platform from explicit names.
    #[must_use]
    pub fn new(system: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            machine: machine.into(),
        }
    }

    /// Detect the current host.
    ///
    /// Known OS/architecture pairs are mapped onto the upstream naming
    /// convention; anything else passes through Rust's identifiers
    /// unchanged, producing an artifact name no release will match (the
    /// locator then falls through to the source build).
    #[must_use]
    pub fn detect() -> Self {
        let system = match std::env::consts::OS {
            "linux" => "Linux",
            "macos" => "Darwin",
            "windows" => "Windows",
            other => other,
        };

        // Apple publishes arm64, Linux distributions aarch64.
        let machine = match (std::env::consts::OS, std::env::consts::ARCH) {
            ("macos", "aarch64") => "arm64",
            (_, arch) => arch,
        };

        Self::new(system, machine)
    }

    /// Release artifact filename for this platform.
    ///
    /// A pure function of the platform names and the fixed prefix/suffix:
    /// identical inputs always produce identical filenames.
    #[must_use]
    pub fn artifact_name(&self) -> String {
        format!(
            "{ARTIFACT_PREFIX}-{}-{}{COMPRESSION_EXT}",
            self.system, self.machine
        )
    }

    /// Name of the directory the artifact extracts to: the artifact
    /// filename with the compression suffix stripped.
    #[must_use]
    pub fn artifact_stem(&self) -> String {
        let name = self.artifact_name();
        name.strip_suffix(COMPRESSION_EXT)
            .map_or_else(|| name.clone(), str::to_owned)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.system, self.machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_name_linux() {
        let platform = Platform::new("Linux", "x86_64");
        assert_eq!(platform.artifact_name(), "native-fpp-Linux-x86_64.tar.gz");
    }

    #[test]
    fn test_artifact_name_darwin_arm() {
        let platform = Platform::new("Darwin", "arm64");
        assert_eq!(platform.artifact_name(), "native-fpp-Darwin-arm64.tar.gz");
    }

    #[test]
    fn test_artifact_name_is_deterministic() {
        let a = Platform::new("Linux", "x86_64").artifact_name();
        let b = Platform::new("Linux", "x86_64").artifact_name();
        assert_eq!(a, b);
    }

    #[test]
    fn test_artifact_stem_strips_suffix() {
        let platform = Platform::new("Linux", "x86_64");
        assert_eq!(platform.artifact_stem(), "native-fpp-Linux-x86_64");
    }

    #[test]
    fn test_detect_is_nonempty() {
        let platform = Platform::detect();
        assert!(!platform.system.is_empty());
        assert!(!platform.machine.is_empty());
    }

    #[test]
    fn test_detect_uses_release_naming() {
        let platform = Platform::detect();
        // Whatever the host, the system name never comes back in Rust's
        // lowercase spelling for the platforms releases exist for.
        assert_ne!(platform.system, "linux");
        assert_ne!(platform.system, "macos");
        assert_ne!(platform.system, "windows");
    }

    #[test]
    fn test_display() {
        let platform = Platform::new("Darwin", "arm64");
        assert_eq!(format!("{platform}"), "Darwin-arm64");
    }
}
