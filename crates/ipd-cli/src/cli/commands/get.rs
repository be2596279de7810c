//! `ipd get <pid>` – download a programme.

use anyhow::Result;
use ipd_core::config::IpdConfig;
use ipd_core::download::{self, Outcome};
use std::path::Path;

pub fn run_get(cfg: &IpdConfig, pid: &str, dest_dir: &Path) -> Result<i32> {
    tracing::info!(pid, dest = %dest_dir.display(), "starting download");
    match download::download(pid, dest_dir, cfg)? {
        Outcome::Completed { path, total_len } => {
            println!("Saved {} ({} bytes)", path.display(), total_len);
            Ok(0)
        }
        Outcome::Unavailable => {
            println!("Nothing to download for {pid}");
            Ok(2)
        }
    }
}
