//! Chunked transfer engine: probe total length, then ranged GETs until the
//! destination file is complete.
//!
//! Resume is keyed off the destination file's length, so a transfer
//! interrupted at any point picks up at the right offset on the next run.
//! There is no retry: a failed chunk fails the whole transfer, and whatever
//! was appended stays on disk for the next attempt.

mod chunk;
mod probe;

pub use chunk::transfer_chunk;
pub use probe::probe_total_length;

use std::path::Path;

use thiserror::Error;

use crate::http::HttpSettings;
use crate::storage;

#[derive(Debug, Error)]
pub enum TransferError {
    /// The probe response carried no `Content-Range` header.
    #[error("response missing Content-Range header")]
    NoContentRange,
    /// `Content-Range` was present but its total could not be parsed.
    #[error("unparseable Content-Range header: {0}")]
    BadContentRange(String),
    #[error("media transport: {0}")]
    Transport(#[from] curl::Error),
    #[error("media server returned HTTP {0}")]
    Http(u32),
    #[error("destination file: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads `url` to `dest_path`: one probe, then chunk GETs while the file
/// is shorter than the reported total. Returns the total length.
///
/// A destination already at (or past) the total performs no chunk requests.
pub fn run_transfer(
    url: &str,
    dest_path: &Path,
    chunk_size: u64,
    settings: &HttpSettings,
) -> Result<u64, TransferError> {
    let total_len = probe_total_length(url, settings)?;
    tracing::info!(total_len, dest = %dest_path.display(), "starting transfer");

    while storage::current_length(dest_path)? < total_len {
        let end = transfer_chunk(url, dest_path, total_len, chunk_size, settings)?;
        tracing::info!("{}/{}", end, total_len);
    }

    Ok(total_len)
}

/// End offset (inclusive) for a chunk starting at `start`.
pub(crate) fn chunk_end(start: u64, chunk_size: u64, total_len: u64) -> u64 {
    (start + chunk_size - 1).min(total_len)
}
