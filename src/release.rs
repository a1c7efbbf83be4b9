//! Release coordinates for cargo-binstall's GitHub releases.
//!
//! Maps the machine processor architecture to a published artifact tag,
//! normalizes version tags, and constructs the download URL for either the
//! latest release or a pinned version.

use anyhow::{Result, bail};
use std::fmt;

use crate::config::ARCH_ENV_VAR;

/// Repository base URL the release artifacts are published under.
pub const REPO_BASE_URL: &str = "https://github.com/cargo-bins/cargo-binstall";

/// Name of the installed tool; also the stem of every release artifact.
pub const TOOL_NAME: &str = "cargo-binstall";

/// Platform and archive suffix of the Windows release artifacts.
const PLATFORM_SUFFIX: &str = "pc-windows-msvc";

/// CPU architectures with published Windows release artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseArch {
    X86_64,
    Aarch64,
}

impl ReleaseArch {
    /// Map the machine `PROCESSOR_ARCHITECTURE` value to a release arch tag.
    ///
    /// Only `AMD64` and `ARM64` have published artifacts. Anything else,
    /// including an unset variable, is an unsupported-architecture condition
    /// and the caller must not attempt a download.
    pub fn from_processor_arch(value: Option<&str>) -> Result<Self> {
        match value {
            Some("AMD64") => Ok(Self::X86_64),
            Some("ARM64") => Ok(Self::Aarch64),
            Some(other) => bail!("unsupported processor architecture: {other}"),
            None => bail!("unsupported processor architecture: {ARCH_ENV_VAR} is not set"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
        }
    }
}

impl fmt::Display for ReleaseArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prepend the `v` tag prefix when absent.
///
/// Release tags carry a lowercase `v` prefix (e.g. "v1.10.0") while users
/// often supply the bare version. Matching is case-sensitive: `V1.2.3` is
/// treated as unprefixed.
pub fn ensure_tag_prefix(tag: &str) -> String {
    if tag.starts_with('v') {
        tag.to_string()
    } else {
        format!("v{tag}")
    }
}

/// Canonical artifact filename for a given architecture:
/// `cargo-binstall-<arch>-pc-windows-msvc.zip`.
pub fn artifact_name(arch: ReleaseArch) -> String {
    format!("{TOOL_NAME}-{arch}-{PLATFORM_SUFFIX}.zip")
}

/// Release download URL for the artifact.
///
/// With no tag, the latest-release download alias is used; with a tag, the
/// versioned download path: `{repo}/releases/download/{tag}/{artifact}`.
pub fn download_url(tag: Option<&str>, arch: ReleaseArch) -> String {
    let artifact = artifact_name(arch);
    match tag {
        None => format!("{REPO_BASE_URL}/releases/latest/download/{artifact}"),
        Some(tag) => format!("{REPO_BASE_URL}/releases/download/{tag}/{artifact}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- ensure_tag_prefix ---------------------------------------------------

    #[test]
    fn prefix_added_when_missing() {
        assert_eq!(ensure_tag_prefix("1.2.3"), "v1.2.3");
    }

    #[test]
    fn prefix_preserved_when_present() {
        assert_eq!(ensure_tag_prefix("v1.2.3"), "v1.2.3");
    }

    #[test]
    fn uppercase_v_is_not_a_prefix() {
        assert_eq!(ensure_tag_prefix("V1.2.3"), "vV1.2.3");
    }

    // -- from_processor_arch -------------------------------------------------

    #[test]
    fn amd64_maps_to_x86_64() {
        let arch = ReleaseArch::from_processor_arch(Some("AMD64")).unwrap();
        assert_eq!(arch, ReleaseArch::X86_64);
        assert_eq!(arch.as_str(), "x86_64");
    }

    #[test]
    fn arm64_maps_to_aarch64() {
        let arch = ReleaseArch::from_processor_arch(Some("ARM64")).unwrap();
        assert_eq!(arch, ReleaseArch::Aarch64);
        assert_eq!(arch.as_str(), "aarch64");
    }

    #[test]
    fn unknown_value_is_rejected_and_named() {
        let err = ReleaseArch::from_processor_arch(Some("IA64"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("IA64"), "err: {err}");
    }

    #[test]
    fn lowercase_value_is_rejected() {
        // The machine-scope variable is uppercase; the lookup is exact.
        assert!(ReleaseArch::from_processor_arch(Some("amd64")).is_err());
    }

    #[test]
    fn missing_value_is_rejected() {
        let err = ReleaseArch::from_processor_arch(None)
            .unwrap_err()
            .to_string();
        assert!(err.contains("PROCESSOR_ARCHITECTURE"), "err: {err}");
    }

    // -- URL construction ----------------------------------------------------

    #[test]
    fn artifact_name_x86_64() {
        assert_eq!(
            artifact_name(ReleaseArch::X86_64),
            "cargo-binstall-x86_64-pc-windows-msvc.zip"
        );
    }

    #[test]
    fn artifact_name_aarch64() {
        assert_eq!(
            artifact_name(ReleaseArch::Aarch64),
            "cargo-binstall-aarch64-pc-windows-msvc.zip"
        );
    }

    #[test]
    fn latest_url_uses_alias_path() {
        let url = download_url(None, ReleaseArch::X86_64);
        assert_eq!(
            url,
            "https://github.com/cargo-bins/cargo-binstall/releases/latest/download/cargo-binstall-x86_64-pc-windows-msvc.zip"
        );
    }

    #[test]
    fn versioned_url_uses_download_path() {
        let url = download_url(Some("v1.2.3"), ReleaseArch::Aarch64);
        assert_eq!(
            url,
            "https://github.com/cargo-bins/cargo-binstall/releases/download/v1.2.3/cargo-binstall-aarch64-pc-windows-msvc.zip"
        );
    }
}
