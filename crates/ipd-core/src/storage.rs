//! Destination-file I/O for chunked transfers.
//!
//! The file's current length is the only resume state: each chunk is
//! appended with a handle opened and closed inside the call, so a run killed
//! between chunks leaves a cleanly resumable file behind.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Current length of the file at `path`, or 0 when it does not exist yet.
pub fn current_length(path: &Path) -> io::Result<u64> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e),
    }
}

/// Appends `data` to the file at `path`, creating it if absent.
pub fn append(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(data)?;
    Ok(())
}
