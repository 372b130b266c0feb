//! Scoped cleanup of the working directory and transient version record.

use std::fs;
use std::path::PathBuf;

/// Best-effort removal of registered paths when dropped.
///
/// The installer promises its host that the scratch directory and the
/// consumed version record are gone once the run is over, whether the run
/// succeeded or unwound with a fatal error. Registered paths that do not
/// exist are ignored; removal failures are logged at DEBUG and suppressed.
#[derive(Debug)]
pub struct CleanupGuard {
    paths: Vec<PathBuf>,
    armed: bool,
}

impl CleanupGuard {
    /// Create an empty, armed guard.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            armed: true,
        }
    }

    /// Register a file or directory for removal at scope exit.
    pub fn register(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    /// Disarm the guard, leaving every registered path in place.
    pub fn keep(&mut self) {
        self.armed = false;
    }
}

impl Default for CleanupGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        for path in &self.paths {
            if !path.exists() {
                continue;
            }
            log::info!("removing {}", path.display());
            let result = if path.is_dir() {
                fs::remove_dir_all(path)
            } else {
                fs::remove_file(path)
            };
            if let Err(err) = result {
                log::debug!("cleanup of {} failed: {err}", path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_removes_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("record.json");
        let subdir = dir.path().join("work");
        fs::write(&file, "{}").unwrap();
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("tool"), "bin").unwrap();

        {
            let mut guard = CleanupGuard::new();
            guard.register(&file);
            guard.register(&subdir);
        }

        assert!(!file.exists());
        assert!(!subdir.exists());
    }

    #[test]
    fn test_keep_disarms_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("record.json");
        fs::write(&file, "{}").unwrap();

        {
            let mut guard = CleanupGuard::new();
            guard.register(&file);
            guard.keep();
        }

        assert!(file.exists());
    }

    #[test]
    fn test_missing_paths_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut guard = CleanupGuard::new();
        guard.register(dir.path().join("never-created"));
        drop(guard);
    }

    #[test]
    fn test_default_is_armed() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("record.json");
        fs::write(&file, "{}").unwrap();

        {
            let mut guard = CleanupGuard::default();
            guard.register(&file);
        }

        assert!(!file.exists());
    }
}
