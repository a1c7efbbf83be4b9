use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::process;

use binstall_bootstrap::config::BootstrapEnv;
use binstall_bootstrap::install::InstallOutcome;
use binstall_bootstrap::path_env::PathAction;
use binstall_bootstrap::release::{ReleaseArch, TOOL_NAME};
use binstall_bootstrap::{fetch, install, output, path_env, release};

/// Bootstrap installer for cargo-binstall on Windows.
///
/// Downloads the prebuilt release archive matching the machine architecture,
/// runs the binary's self-install routine, and makes sure the cargo bin
/// directory ends up on the executable search path.
#[derive(Parser, Debug)]
#[command(name = "binstall-bootstrap", about)]
struct Cli {
    /// Release tag to install (e.g. "v1.10.0" or "1.10.0").
    /// Defaults to BINSTALL_VERSION, then the latest release.
    #[arg(long, value_name = "TAG")]
    tag: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let env = BootstrapEnv::capture();

    // Resolve the architecture up front: with no matching artifact there is
    // nothing to download.
    let arch = match ReleaseArch::from_processor_arch(env.processor_arch.as_deref()) {
        Ok(arch) => arch,
        Err(e) => {
            output::fail("Unsupported", &e.to_string());
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &env, arch) {
        output::fail("Error", &format!("{e:#}"));
        process::exit(1);
    }
}

fn run(cli: &Cli, env: &BootstrapEnv, arch: ReleaseArch) -> Result<()> {
    let tag = env
        .requested_version(cli.tag.as_deref())
        .map(|tag| release::ensure_tag_prefix(&tag));
    let url = release::download_url(tag.as_deref(), arch);

    let archive_path = env.temp_dir.join(format!("{TOOL_NAME}.zip"));
    let extract_dir = env.temp_dir.join(TOOL_NAME);

    // The temp archive and extraction directory are removed no matter how the
    // install itself went.
    let outcome = fetch_and_install(&url, &archive_path, &extract_dir);
    fetch::cleanup(&archive_path, &extract_dir);
    let outcome = outcome?;

    match outcome {
        InstallOutcome::Installed => output::success("Installed", TOOL_NAME),
        InstallOutcome::Reinstalled => {
            output::success("Installed", &format!("{TOOL_NAME} (via forced reinstall)"));
        }
        InstallOutcome::Failed => {
            output::fail("Failed", &format!("{TOOL_NAME} did not install itself"));
        }
    }

    let bin_dir = env.cargo_bin_dir()?;
    match path_env::ensure_on_path(env, &bin_dir)? {
        PathAction::AlreadyPresent => {}
        PathAction::AppendedToCiFile => {
            output::detail(&format!("added {} to the CI path file", bin_dir.display()));
        }
        PathAction::Warned => {
            output::warn(&path_env::missing_path_warning(&bin_dir));
        }
    }

    Ok(())
}

/// Download, unpack, and run the installer. Split out from [`run`] so the
/// caller can clean up the temp paths regardless of where this fails.
fn fetch_and_install(
    url: &str,
    archive_path: &Path,
    extract_dir: &Path,
) -> Result<InstallOutcome> {
    output::action("Downloading", url);
    fetch::download_to_file(url, archive_path)?;

    output::action("Extracting", &extract_dir.display().to_string());
    fetch::extract_zip(archive_path, extract_dir)?;

    let binary = install::installer_path(extract_dir)?;
    output::action("Installing", &format!("{} --self-install", binary.display()));
    install::run_self_install(&binary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_without_args() {
        let cli = Cli::parse_from(["binstall-bootstrap"]);
        assert_eq!(cli.tag, None);
    }

    #[test]
    fn cli_parses_tag() {
        let cli = Cli::parse_from(["binstall-bootstrap", "--tag", "v1.10.0"]);
        assert_eq!(cli.tag.as_deref(), Some("v1.10.0"));
    }

    #[test]
    fn cli_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["binstall-bootstrap", "--frobnicate"]).is_err());
    }
}
