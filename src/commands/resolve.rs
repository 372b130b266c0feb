//! Read-only informational commands.

use crate::cli::ResolveArgs;
use anyhow::Result;
use fppkit::{InstallConfig, Platform, version};

/// Print the resolved tools version and the derived package version
/// without installing anything.
pub fn run(args: &ResolveArgs) -> Result<()> {
    let config = InstallConfig::from_env().trust_version_file(args.trust_version_file);
    let tools_version = version::resolve(&config)?;

    println!("tools version:   {tools_version}");
    println!("package version: {}", version::package_version(&tools_version));
    Ok(())
}

/// Print the release artifact filename for this platform.
pub fn artifact() -> Result<()> {
    println!("{}", Platform::detect().artifact_name());
    Ok(())
}
