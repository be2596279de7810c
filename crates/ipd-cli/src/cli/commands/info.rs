//! `ipd info <pid>` – show title and versions without downloading.

use anyhow::Result;
use ipd_core::config::IpdConfig;
use ipd_core::playlist;

pub fn run_info(cfg: &IpdConfig, pid: &str) -> Result<()> {
    let programme = playlist::resolve_versions(pid, &cfg.playlist_prefix, &cfg.metadata_http())?;

    match &programme.title {
        Some(title) => println!("Title: {title}"),
        None => println!("Title: (none)"),
    }
    for (i, version) in programme.versions.iter().enumerate() {
        match version {
            Some(id) => println!("  version {i}: {id}"),
            None => println!("  version {i}: (no identifier)"),
        }
    }
    Ok(())
}
