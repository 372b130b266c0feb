//! Acquisition fallback chain: local cache, release download, source build.
//!
//! The chain deliberately trades graceful recovery for simplicity: it runs
//! inside a short-lived installer, so an unexpected failure at any tier is
//! returned as a fatal error rather than retried. Only two conditions are
//! "expected absence" and fall through to the next tier: a cache directory
//! without the artifact, and a release download answering 404.

use crate::config::InstallConfig;
use crate::error::{Error, Result};
use crate::locator;
use crate::platform::Platform;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Maximum artifact download size (200 MB covers every FPP release to date).
const MAX_DOWNLOAD_SIZE: u64 = 200 * 1024 * 1024;

/// External tools the source build requires on the search path.
const BUILD_TOOLS: [&str; 4] = ["git", "sh", "java", "sbt"];

/// Run the acquisition chain and return the directory holding the tools.
///
/// With an explicit download cache configured the chain is cache → source
/// build: a configured cache means offline installation, so a miss never
/// touches the network. Without one, the release artifact is fetched into
/// the working directory first and the working directory doubles as the
/// cache for the locator pass.
pub fn acquire(config: &InstallConfig, platform: &Platform, version: &str) -> Result<PathBuf> {
    if !config.has_external_cache() {
        download_release(config, platform, version)?;
    }

    if let Some(tools_dir) = locator::prepare(config.cache_dir(), &config.working_dir, platform)? {
        return Ok(tools_dir);
    }

    log::warn!("cached/released tools not found, falling back to git clone");
    build_from_source(config, config.cache_dir(), version)
}

/// Fetch the release artifact into the working directory.
///
/// A 404 is the expected "no prebuilt artifact for this platform" case and
/// leaves the working directory untouched; any other transport or server
/// failure is fatal — retrying the install will likely resolve it, but this
/// process will not.
fn download_release(config: &InstallConfig, platform: &Platform, version: &str) -> Result<()> {
    let artifact = platform.artifact_name();
    let url = format!(
        "{}/releases/download/{}/{}",
        config.repo_url, version, artifact
    );

    log::info!("fetching FPP tools at {url}");
    let agent = ureq::Agent::new_with_defaults();
    let mut response = match agent.get(&url).header("User-Agent", "fpp-install").call() {
        Ok(response) => response,
        Err(ureq::Error::StatusCode(404)) => {
            log::warn!("no release artifact at {url} (HTTP 404)");
            return Ok(());
        }
        Err(ureq::Error::StatusCode(code)) => {
            return Err(Error::download(url, format!("HTTP {code}"), Some(code)));
        }
        Err(err) => return Err(Error::download(url, err.to_string(), None)),
    };

    let bytes = response
        .body_mut()
        .with_config()
        .limit(MAX_DOWNLOAD_SIZE)
        .read_to_vec()
        .map_err(|e| Error::download(&url, e.to_string(), None))?;

    let dest = config.working_dir.join(&artifact);
    fs::write(&dest, &bytes).map_err(|e| Error::io(&dest, e))?;
    Ok(())
}

/// Clone the upstream repository at `version` and run its own install
/// script, targeting `install_dir`.
///
/// All required build tools are verified before anything is cloned, so a
/// missing `sbt` fails in milliseconds instead of after a checkout.
fn build_from_source(config: &InstallConfig, install_dir: &Path, version: &str) -> Result<PathBuf> {
    ensure_build_tools(&BUILD_TOOLS)?;

    let build_dir = tempfile::tempdir().map_err(|e| Error::io(std::env::temp_dir(), e))?;
    let build_path = build_dir.path();

    let mut clone = Command::new("git");
    clone.arg("clone").arg(&config.repo_url).arg(build_path);
    run_step(clone, build_path)?;

    let mut checkout = Command::new("git");
    checkout.args(["checkout", version]);
    run_step(checkout, build_path)?;

    let mut install = Command::new(build_path.join("compiler").join("install"));
    install.arg(install_dir);
    run_step(install, build_path)?;

    Ok(install_dir.to_path_buf())
}

/// Verify every named executable resolves on the search path.
fn ensure_build_tools(tools: &[&'static str]) -> Result<()> {
    for &tool in tools {
        if which::which(tool).is_err() {
            return Err(Error::ToolMissing { tool });
        }
    }
    Ok(())
}

/// Run one build step with inherited stdio, failing on a non-zero exit.
fn run_step(mut command: Command, cwd: &Path) -> Result<()> {
    let step = render(&command);
    log::info!("running {step}");

    let status = command
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|_| Error::StepFailed { step: step.clone() })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::StepFailed { step })
    }
}

/// Render a command line for diagnostics.
fn render(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
