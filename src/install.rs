//! Invocation of the extracted binary's own install routine.
//!
//! The downloaded release carries the real installer: cargo-binstall places
//! itself into the cargo bin directory when run with `--self-install`. When
//! that exits non-zero, a second invocation requests a non-interactive forced
//! reinstall of itself.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::release::TOOL_NAME;

/// How the self-install attempt concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// `--self-install` exited 0.
    Installed,
    /// `--self-install` failed; the forced reinstall exited 0.
    Reinstalled,
    /// Both invocations exited non-zero.
    Failed,
}

/// Locate the extracted installer binary inside `extract_dir`.
///
/// Release archives place the binary at the archive root, named with an
/// `.exe` extension on Windows artifacts.
pub fn installer_path(extract_dir: &Path) -> Result<PathBuf> {
    let with_exe = extract_dir.join(format!("{TOOL_NAME}.exe"));
    if with_exe.is_file() {
        return Ok(with_exe);
    }
    let bare = extract_dir.join(TOOL_NAME);
    if bare.is_file() {
        return Ok(bare);
    }
    bail!(
        "extracted archive does not contain the {TOOL_NAME} binary in {}",
        extract_dir.display()
    )
}

/// Run the binary's self-install routine, waiting for completion.
///
/// A non-zero exit triggers one fallback: `-y --force cargo-binstall`, a
/// forced reinstall of the tool by itself. There is no further fallback
/// beyond that.
pub fn run_self_install(binary: &Path) -> Result<InstallOutcome> {
    let status = Command::new(binary)
        .arg("--self-install")
        .status()
        .with_context(|| format!("failed to run {}", binary.display()))?;
    if status.success() {
        return Ok(InstallOutcome::Installed);
    }

    let status = Command::new(binary)
        .args(["-y", "--force", TOOL_NAME])
        .status()
        .with_context(|| format!("failed to run {}", binary.display()))?;
    Ok(if status.success() {
        InstallOutcome::Reinstalled
    } else {
        InstallOutcome::Failed
    })
}
