//! Error types for installer operations.
//!
//! Every variant here is fatal by the time it reaches the binary: expected
//! absences (no cached artifact, release 404, unusable version record) are
//! communicated as `None` by the individual tiers, never as an [`Error`].

use std::io;
use std::path::PathBuf;

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or installing the tool suite.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No tools version could be resolved from any source.
    #[error("no tools version configured: set the {var} environment variable")]
    VersionNotConfigured {
        /// Environment variable that would have supplied the version.
        var: &'static str,
    },

    /// Release download failed in a way that is not a plain "not found".
    #[error("download failed for {url}: {message}")]
    Download {
        /// URL that was fetched.
        url: String,
        /// Error message.
        message: String,
        /// HTTP status code if the server responded.
        status: Option<u16>,
    },

    /// A required external build tool is missing from the search path.
    #[error("{tool} must exist on PATH")]
    ToolMissing {
        /// Name of the missing executable.
        tool: &'static str,
    },

    /// An external build step exited with a non-zero status or failed to spawn.
    #[error("failed to run {step}")]
    StepFailed {
        /// Rendered command line of the failed step.
        step: String,
    },

    /// Archive decompression or unpacking failed.
    #[error("failed to unpack {path}: {message}")]
    Extract {
        /// Archive that could not be unpacked.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// IO error during file operations.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path involved in the error.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a download error.
    pub fn download(url: impl Into<String>, message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_not_configured_display() {
        let err = Error::VersionNotConfigured {
            var: "FPP_TOOLS_VERSION",
        };
        assert!(err.to_string().contains("FPP_TOOLS_VERSION"));
    }

    #[test]
    fn test_tool_missing_display() {
        let err = Error::ToolMissing { tool: "sbt" };
        assert_eq!(err.to_string(), "sbt must exist on PATH");
    }

    #[test]
    fn test_step_failed_display() {
        let err = Error::StepFailed {
            step: "git checkout v1.0.0".to_string(),
        };
        assert!(err.to_string().contains("git checkout v1.0.0"));
    }

    #[test]
    fn test_download_constructor() {
        let err = Error::download("https://example.com/a.tar.gz", "HTTP 500", Some(500));
        match err {
            Error::Download { url, status, .. } => {
                assert_eq!(url, "https://example.com/a.tar.gz");
                assert_eq!(status, Some(500));
            }
            _ => panic!("expected Error::Download"),
        }
    }

    #[test]
    fn test_io_constructor() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::io("/some/path", io_err);
        match err {
            Error::Io { path, .. } => assert_eq!(path, PathBuf::from("/some/path")),
            _ => panic!("expected Error::Io"),
        }
    }
}
