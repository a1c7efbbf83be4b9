//! Download and unpack release archives, plus end-of-run cleanup.
//!
//! The download runs a single blocking HTTP GET driven by a current-thread
//! Tokio runtime; the archive lands at a fixed temp path and is unpacked
//! wholesale into a fixed temp directory. Both are removed again by
//! [`cleanup`] whether or not the install succeeded.

use anyhow::{Context, Result, bail};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// User-Agent header sent with release downloads.
const USER_AGENT: &str = "binstall-bootstrap";

/// HTTP timeout for the release download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Builds a reqwest client with standard headers and timeout.
fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .context("failed to build HTTP client")
}

/// Download `url` to `dest`, overwriting any existing file at that path.
pub fn download_to_file(url: &str, dest: &Path) -> Result<()> {
    let client = build_http_client()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create Tokio runtime for HTTP request")?;

    let bytes = runtime.block_on(async move {
        let response = client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to connect to release server at {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("download failed: HTTP {status} from {url}");
        }

        response
            .bytes()
            .await
            .with_context(|| format!("failed to read response body from {url}"))
    })?;

    fs::write(dest, &bytes)
        .with_context(|| format!("failed to write archive to {}", dest.display()))?;

    Ok(())
}

/// Unpack the whole zip archive into `dest_dir`, overwriting existing files.
///
/// Entry paths are resolved against `dest_dir`; absolute entries and entries
/// that traverse out of the destination are rejected.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)
        .with_context(|| format!("failed to open archive: {}", archive_path.display()))?;
    let mut archive = zip::ZipArchive::new(file).context("failed to read zip archive")?;

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("failed to create {}", dest_dir.display()))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).context("failed to read zip entry")?;

        let Some(rel_path) = entry.enclosed_name() else {
            bail!("archive entry has an unsafe path: {}", entry.name());
        };
        let dest = dest_dir.join(rel_path);

        if entry.is_dir() {
            fs::create_dir_all(&dest)
                .with_context(|| format!("failed to create {}", dest.display()))?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut out = fs::File::create(&dest)
            .with_context(|| format!("failed to create extracted file: {}", dest.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("failed to write extracted file: {}", dest.display()))?;
    }

    Ok(())
}

/// Best-effort removal of the downloaded archive and extraction directory.
///
/// Not gated on prior step success; removal errors are ignored.
pub fn cleanup(archive_path: &Path, extract_dir: &Path) {
    let _ = fs::remove_file(archive_path);
    let _ = fs::remove_dir_all(extract_dir);
}
