//! Authorization handshake with the media selector.
//!
//! The selector does not answer the probe with content: it answers with a
//! redirect whose `Location` header is the signed, time-limited media URL.
//! The handle keeps redirect following off so that URL is returned to the
//! caller instead of being followed. The URL is valid for one download
//! attempt only and must never be persisted across runs.

use thiserror::Error;

use crate::http::{self, HttpSettings};

#[derive(Debug, Error)]
pub enum AuthError {
    /// The selector answered without a `Location` header.
    #[error("media selector returned no stream location")]
    Unauthorized,
    #[error("media selector transport: {0}")]
    Transport(#[from] curl::Error),
}

/// Builds the media-selector request URL for a version identifier.
///
/// `cache_bust` is an arbitrary integer in `[0, 1_000_000)` appended as the
/// whole query string to defeat intermediary caches; callers inject it so
/// tests stay deterministic.
pub fn selector_url(media_selector_prefix: &str, version_id: &str, cache_bust: u32) -> String {
    format!("{media_selector_prefix}/{version_id}?{cache_bust}")
}

/// Requests a signed stream URL for `version_id`.
///
/// Sends the probe GET (`Range: bytes=0-1`, spoofed identity) and reads the
/// `Location` response header. The response body is drained whatever the
/// outcome so the connection stays reusable.
pub fn authorize(
    version_id: &str,
    media_selector_prefix: &str,
    cache_bust: u32,
    settings: &HttpSettings,
) -> Result<String, AuthError> {
    let url = selector_url(media_selector_prefix, version_id, cache_bust);
    tracing::debug!(%url, "requesting stream authorization");

    let mut easy = http::ranged_handle(&url, "0-1", settings)?;

    let mut header_lines: Vec<String> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = std::str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        // Drain without keeping: only the headers matter here.
        transfer.write_function(|data| Ok(data.len()))?;
        transfer.perform()?;
    }

    match http::find_header(&header_lines, "Location") {
        Some(location) if !location.is_empty() => Ok(location.to_string()),
        _ => Err(AuthError::Unauthorized),
    }
}
