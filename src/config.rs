//! Environment-driven configuration for a bootstrap run.
//!
//! Everything this tool consults lives in environment variables, so the
//! configuration layer is a one-shot snapshot taken at startup plus a few
//! resolution helpers on top of it. Resolution functions operate on the
//! snapshot rather than reading the process environment directly, so tests
//! can construct arbitrary environments without mutating global state.

use anyhow::{Result, anyhow};
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable holding an optional release-version override.
pub const VERSION_ENV_VAR: &str = "BINSTALL_VERSION";

/// Environment variable carrying the machine processor architecture.
pub const ARCH_ENV_VAR: &str = "PROCESSOR_ARCHITECTURE";

/// Environment variable marking a CI environment.
pub const CI_ENV_VAR: &str = "CI";

/// Environment variable naming the CI path-propagation file.
pub const CI_PATH_FILE_ENV_VAR: &str = "GITHUB_PATH";

/// Environment variable overriding the cargo install prefix.
const CARGO_HOME_ENV_VAR: &str = "CARGO_HOME";

/// Snapshot of all environment state the bootstrapper consumes.
#[derive(Debug, Clone, Default)]
pub struct BootstrapEnv {
    /// `BINSTALL_VERSION`, when set to a non-empty value.
    pub version_override: Option<String>,
    /// `PROCESSOR_ARCHITECTURE`, when set to a non-empty value.
    pub processor_arch: Option<String>,
    /// The process temp directory (honors `TEMP` on Windows).
    pub temp_dir: PathBuf,
    /// `CARGO_HOME`, when set to a non-empty value.
    pub cargo_home: Option<String>,
    /// Home directory: `USERPROFILE`, falling back to `HOME`.
    pub home: Option<String>,
    /// Whether the `CI` marker variable is set at all.
    pub ci: bool,
    /// `GITHUB_PATH`, when set.
    pub ci_path_file: Option<PathBuf>,
    /// The raw `PATH` value.
    pub path_var: Option<OsString>,
}

impl BootstrapEnv {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            version_override: env_nonempty(VERSION_ENV_VAR),
            processor_arch: env_nonempty(ARCH_ENV_VAR),
            temp_dir: std::env::temp_dir(),
            cargo_home: env_nonempty(CARGO_HOME_ENV_VAR),
            home: env_nonempty("USERPROFILE").or_else(|| env_nonempty("HOME")),
            ci: std::env::var_os(CI_ENV_VAR).is_some(),
            ci_path_file: std::env::var_os(CI_PATH_FILE_ENV_VAR).map(PathBuf::from),
            path_var: std::env::var_os("PATH"),
        }
    }

    /// Resolve the requested release version.
    ///
    /// Priority (highest wins):
    /// 1. `cli_tag` — the `--tag` flag value for this invocation
    /// 2. `BINSTALL_VERSION` environment variable
    ///
    /// Empty or whitespace-only values at either layer are treated as absent.
    /// `None` means "install the latest release".
    pub fn requested_version(&self, cli_tag: Option<&str>) -> Option<String> {
        let candidate = cli_tag
            .map(str::to_owned)
            .or_else(|| self.version_override.clone())?;
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// The directory cargo-binstall installs binaries into:
    /// `<CARGO_HOME>/bin`, or `<home>/.cargo/bin` when `CARGO_HOME` is unset.
    pub fn cargo_bin_dir(&self) -> Result<PathBuf> {
        if let Some(cargo_home) = &self.cargo_home {
            return Ok(PathBuf::from(cargo_home).join("bin"));
        }
        let home = self.home.as_deref().ok_or_else(|| {
            anyhow!("cannot determine the cargo bin directory: neither CARGO_HOME nor a home directory is set")
        })?;
        Ok(PathBuf::from(home).join(".cargo").join("bin"))
    }
}

/// Read an environment variable, treating empty and whitespace-only values
/// as absent.
fn env_nonempty(name: &str) -> Option<String> {
    let value = std::env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
