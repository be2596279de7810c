//! Blocking GET for the playlist document body.

use curl::easy::Easy;

use super::FetchError;
use crate::http::HttpSettings;

/// Fetches `url` and returns the response body, or `None` when the server
/// answered with an empty body (no document for that id). The body is always
/// consumed in full before returning.
pub(super) fn fetch_document(
    url: &str,
    settings: &HttpSettings,
) -> Result<Option<Vec<u8>>, FetchError> {
    let mut easy = Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(false)?;
    easy.useragent(&settings.user_agent)?;
    easy.connect_timeout(settings.connect_timeout)?;
    easy.timeout(settings.request_timeout)?;

    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(body))
}
