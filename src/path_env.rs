//! Executable search-path inspection and CI propagation.
//!
//! After the install, the cargo bin directory must be reachable through
//! `PATH`. Under a recognized CI environment the directory is appended to the
//! runner's path-propagation file; anywhere else the user gets a warning and
//! nothing is modified.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::config::BootstrapEnv;

/// What the path check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAction {
    /// The bin directory is already on `PATH`; nothing to do.
    AlreadyPresent,
    /// Appended the bin directory to the CI path-propagation file.
    AppendedToCiFile,
    /// Nothing was modified; the caller should warn the user.
    Warned,
}

/// Whether `dir` is a member of the `PATH`-style value `path_var`,
/// split on the platform path separator.
pub fn path_contains(path_var: Option<&OsStr>, dir: &Path) -> bool {
    let Some(path_var) = path_var else {
        return false;
    };
    std::env::split_paths(path_var).any(|entry| entry == dir)
}

/// Append one line naming `dir` to the CI path-propagation file.
///
/// The runner reads the file after job setup, so appending is all that is
/// needed to extend subsequent steps' search path.
pub fn append_to_ci_path_file(file: &Path, dir: &Path) -> Result<()> {
    let mut handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .with_context(|| format!("failed to open CI path file at {}", file.display()))?;
    writeln!(handle, "{}", dir.display())
        .with_context(|| format!("failed to append to CI path file at {}", file.display()))?;
    Ok(())
}

/// Human-readable warning for a bin directory missing from `PATH`.
pub fn missing_path_warning(dir: &Path) -> String {
    format!(
        "your PATH is missing {}, you might want to add it",
        dir.display()
    )
}

/// Check `PATH` membership and propagate or flag the bin directory.
///
/// CI propagation requires both the `CI` marker and the path-file variable;
/// with either absent, the result is [`PathAction::Warned`] and no file is
/// touched.
pub fn ensure_on_path(env: &BootstrapEnv, dir: &Path) -> Result<PathAction> {
    if path_contains(env.path_var.as_deref(), dir) {
        return Ok(PathAction::AlreadyPresent);
    }
    if env.ci {
        if let Some(file) = &env.ci_path_file {
            append_to_ci_path_file(file, dir)?;
            return Ok(PathAction::AppendedToCiFile);
        }
    }
    Ok(PathAction::Warned)
}
