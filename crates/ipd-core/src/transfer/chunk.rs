//! Single ranged chunk GET, appended to the destination file.

use std::path::Path;

use super::{chunk_end, TransferError};
use crate::http::{self, HttpSettings};
use crate::storage;

/// Downloads one chunk of `url` into `dest_path` and returns the end offset
/// that was requested.
///
/// The start offset is the destination file's current length (0 when the
/// file does not exist yet), so rerunning after an interrupted transfer
/// continues where the bytes actually stop. The whole response body is read
/// before anything is appended; a transport failure mid-chunk therefore
/// leaves the file exactly as it was.
pub fn transfer_chunk(
    url: &str,
    dest_path: &Path,
    total_len: u64,
    chunk_size: u64,
    settings: &HttpSettings,
) -> Result<u64, TransferError> {
    let start = storage::current_length(dest_path)?;
    let end = chunk_end(start, chunk_size, total_len);
    tracing::debug!(start, end, url, "fetching chunk");

    let mut easy = http::ranged_handle(url, &format!("{start}-{end}"), settings)?;

    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransferError::Http(code));
    }

    storage::append(dest_path, &body)?;
    Ok(end)
}
