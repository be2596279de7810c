//! Shared HTTP plumbing for the pipeline.
//!
//! Every request goes out through a curl easy handle carrying the spoofed
//! CoreMedia client identity, `Accept: */*`, and a `Range` header. Redirect
//! following stays disabled on every handle: the media selector answers with
//! a `Location` header that *is* the payload, and a transport that follows
//! it would silently swallow the token-bearing URL.

use curl::easy::{Easy, List};
use std::time::Duration;

/// Client identity the streaming endpoints expect.
pub const CORE_MEDIA_USER_AGENT: &str = "Apple iPhone v1.1.1 CoreMedia v1.0.0.3A110a";

/// Per-request transport settings, threaded explicitly through the pipeline.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Hard wall-clock cap for the whole request.
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: CORE_MEDIA_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(15),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Builds a GET handle with the common header set and `Range: bytes={range}`.
///
/// `range` is the bare byte range (`"0-1"`, `"524288-1048575"`); curl adds
/// the `bytes=` unit itself.
pub(crate) fn ranged_handle(
    url: &str,
    range: &str,
    settings: &HttpSettings,
) -> Result<Easy, curl::Error> {
    let mut easy = Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    // Location headers carry data here, never navigation.
    easy.follow_location(false)?;
    easy.useragent(&settings.user_agent)?;
    easy.connect_timeout(settings.connect_timeout)?;
    easy.timeout(settings.request_timeout)?;
    easy.range(range)?;

    let mut list = List::new();
    list.append("Accept: */*")?;
    easy.http_headers(list)?;
    Ok(easy)
}

/// Case-insensitive lookup of a header value in raw `Name: value` lines.
pub(crate) fn find_header<'a>(lines: &'a [String], name: &str) -> Option<&'a str> {
    lines.iter().find_map(|line| {
        let (n, v) = line.split_once(':')?;
        if n.trim().eq_ignore_ascii_case(name) {
            Some(v.trim())
        } else {
            None
        }
    })
}
