//! Tools-version resolution and package-version derivation.

use crate::config::{InstallConfig, TOOLS_VERSION_VAR};
use crate::error::{Error, Result};
use crate::handoff;
use regex::Regex;
use std::sync::LazyLock;

static EXACT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+\.\d+\.\d+$").expect("valid regex"));

static BARE_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-fA-F0-9]{8,40}$").expect("valid regex"));

static DESCRIBE_OUTPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v(\d+\.\d+\.\d+)-(\d+)-g([a-fA-F0-9]{8,40})$").expect("valid regex")
});

/// Resolve the FPP tools version for this run.
///
/// Priority, highest first:
///
/// 1. the transient record left by an outer installer, accepted only when
///    its creating process matches our parent (or the trust flag is set);
/// 2. the `FPP_TOOLS_VERSION` value captured into the configuration;
/// 3. the version baked into the package at build time.
///
/// There is no silent default: when nothing resolves, the error names the
/// environment variable the caller must set.
pub fn resolve(config: &InstallConfig) -> Result<String> {
    let fallback = config
        .env_version
        .clone()
        .or_else(|| config.packaged_version.clone());

    handoff::read(&config.version_file, config.trust_version_file)
        .or(fallback)
        .ok_or(Error::VersionNotConfigured {
            var: TOOLS_VERSION_VAR,
        })
}

/// Derive a monotonic package version from a raw tools version token.
///
/// Downstream packaging needs a PEP-440-like version even when the tools
/// version is a loose git descriptor:
///
/// - an exact `vX.Y.Z` tag is returned unchanged;
/// - a bare commit hash becomes `v0.0.0.dev999+g<hash[:8]>`;
/// - a `git describe` token `vX.Y.Z-N-gHASH` becomes `X.Y.Z.devN+g<HASH[:8]>`;
/// - anything else becomes the `v0.0.0.dev999+g00000000` placeholder.
#[must_use]
pub fn package_version(tools_version: &str) -> String {
    if EXACT_VERSION.is_match(tools_version) {
        return tools_version.to_string();
    }
    if BARE_HASH.is_match(tools_version) {
        return format!("v0.0.0.dev999+g{}", &tools_version[..8]);
    }
    if let Some(captures) = DESCRIBE_OUTPUT.captures(tools_version) {
        return format!("{}.dev{}+g{}", &captures[1], &captures[2], &captures[3][..8]);
    }
    "v0.0.0.dev999+g00000000".to_string()
}
