//! CLI for the ipd iPlayer downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ipd_core::config;
use std::path::PathBuf;

use commands::{run_get, run_info};

/// Top-level CLI for the ipd downloader.
#[derive(Debug, Parser)]
#[command(name = "ipd")]
#[command(about = "ipd: resumable iPlayer programme downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a programme by its pid, resuming a partial file if present.
    Get {
        /// Programme identifier (pid).
        pid: String,
        /// Destination directory (defaults to the configured one, then the
        /// current directory).
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Show a programme's title and available versions without downloading.
    Info {
        /// Programme identifier (pid).
        pid: String,
    },
}

impl Cli {
    /// Parses arguments and dispatches. Returns the process exit code:
    /// 0 on success, 2 when there was nothing to download.
    pub fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;

        match cli.command {
            CliCommand::Get { pid, dest } => {
                let dest_dir = dest
                    .or_else(|| cfg.destination.clone())
                    .unwrap_or_else(|| PathBuf::from("."));
                run_get(&cfg, &pid, &dest_dir)
            }
            CliCommand::Info { pid } => {
                run_info(&cfg, &pid)?;
                Ok(0)
            }
        }
    }
}
