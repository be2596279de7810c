//! Download orchestration: pid → version → signed URL → chunked transfer.

use anyhow::{Context, Result};
use rand::Rng;
use std::path::{Path, PathBuf};

use crate::auth::{self, AuthError};
use crate::config::IpdConfig;
use crate::playlist;
use crate::target::DownloadTarget;
use crate::transfer;

/// How a download attempt ended. `Unavailable` covers the benign negatives
/// (no usable version in the playlist, or the selector granted no stream
/// URL) as opposed to actual failures, which propagate as errors.
#[derive(Debug)]
pub enum Outcome {
    Completed { path: PathBuf, total_len: u64 },
    Unavailable,
}

/// Downloads the programme `pid` into `dest_dir`, resuming any partial file
/// already there.
///
/// Pipeline: resolve the playlist, take the first version with an
/// identifier, derive the destination filename from the playlist title (the
/// pid itself when the playlist is untitled), authorize a stream URL with a
/// fresh cache-bust value, then probe and transfer chunks until complete.
pub fn download(pid: &str, dest_dir: &Path, cfg: &IpdConfig) -> Result<Outcome> {
    let metadata_http = cfg.metadata_http();

    let programme = playlist::resolve_versions(pid, &cfg.playlist_prefix, &metadata_http)
        .with_context(|| format!("resolving versions for {pid}"))?;

    let Some(version) = programme.first_usable_version() else {
        tracing::info!(pid, "playlist has no version with an identifier");
        return Ok(Outcome::Unavailable);
    };

    let stem = programme.title.as_deref().unwrap_or(pid);
    let target = DownloadTarget::from_title(dest_dir, stem);

    let cache_bust: u32 = rand::rng().random_range(0..1_000_000);
    let stream_url = match auth::authorize(
        version,
        &cfg.media_selector_prefix,
        cache_bust,
        &metadata_http,
    ) {
        Ok(url) => url,
        Err(AuthError::Unauthorized) => {
            tracing::info!(pid, version, "no stream authorization granted");
            return Ok(Outcome::Unavailable);
        }
        Err(e) => return Err(e).context("authorizing stream"),
    };

    let dest_path = target.path();
    let total_len = transfer::run_transfer(&stream_url, &dest_path, cfg.chunk_size, &cfg.chunk_http())
        .with_context(|| format!("transferring {}", target.filename))?;

    tracing::info!(path = %dest_path.display(), total_len, "download complete");
    Ok(Outcome::Completed {
        path: dest_path,
        total_len,
    })
}
