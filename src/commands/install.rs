//! Install the FPP tool suite.
//!
//! This is the hook entry point the host packaging system invokes. The
//! resulting entries are printed one per line; with `--dest` they are also
//! copied out of the scratch directory before the scoped cleanup removes it.

use crate::cli::InstallArgs;
use anyhow::{Context, Result};
use fppkit::{InstallConfig, Installation, Installer};
use std::fs;
use std::path::Path;

/// Run the install command.
pub fn run(args: &InstallArgs) -> Result<()> {
    let config = InstallConfig::from_env().trust_version_file(args.trust_version_file);
    let installer = Installer::new(config);
    let installation = installer.run()?;

    log::info!(
        "installed FPP tools {} (package version {})",
        installation.tools_version(),
        installation.package_version()
    );

    if let Some(dest) = &args.dest {
        copy_entries(&installation, dest)?;
        log::info!("copied {} entries to {}", installation.entries().len(), dest.display());
    }

    for entry in installation.entries() {
        println!("{}", entry.display());
    }
    Ok(())
}

/// Copy every installed entry into `dest`, preserving directory structure.
fn copy_entries(installation: &Installation, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;

    for entry in installation.entries() {
        let name = entry
            .file_name()
            .with_context(|| format!("unnamed entry {}", entry.display()))?;
        copy_path(entry, &dest.join(name))?;
    }
    Ok(())
}

/// Copy a file or a directory tree. `fs::copy` preserves permission bits,
/// so tool binaries stay executable.
fn copy_path(src: &Path, dest: &Path) -> Result<()> {
    if !src.is_dir() {
        fs::copy(src, dest)
            .with_context(|| format!("failed to copy {}", src.display()))?;
        return Ok(());
    }

    for entry in walkdir::WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("failed to create {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("failed to copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}
