//! Total-length probe via a two-byte ranged GET.

use curl::easy::Easy;

use super::TransferError;
use crate::http::{self, HttpSettings};

/// Asks the media server for bytes 0-1 and reads the total file length out
/// of the `Content-Range` response header (`<unit> <start>-<end>/<total>`).
pub fn probe_total_length(url: &str, settings: &HttpSettings) -> Result<u64, TransferError> {
    let mut easy: Easy = http::ranged_handle(url, "0-1", settings)?;

    let mut header_lines: Vec<String> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = std::str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| Ok(data.len()))?;
        transfer.perform()?;
    }

    let content_range =
        http::find_header(&header_lines, "Content-Range").ok_or(TransferError::NoContentRange)?;
    parse_content_range_total(content_range)
}

/// Extracts the `<total>` field of a `Content-Range` value.
pub(crate) fn parse_content_range_total(value: &str) -> Result<u64, TransferError> {
    let total = value
        .rsplit_once('/')
        .map(|(_, total)| total.trim())
        .ok_or_else(|| TransferError::BadContentRange(value.to_string()))?;
    total
        .parse::<u64>()
        .map_err(|_| TransferError::BadContentRange(value.to_string()))
}
