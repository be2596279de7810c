//! Playlist resolution: programme id → display title + version identifiers.
//!
//! The playlist endpoint returns an XML document with a `<title>` element and
//! one `<item>` element per rendition (standard, audio-described, signed),
//! each carrying an `identifier` attribute. Items keep their document order;
//! an item without the attribute stays in the list as `None` so callers can
//! tell "fewer versions" apart from "unset identifier".

mod fetch;
mod parse;

pub use parse::Playlist;

use thiserror::Error;

use crate::http::HttpSettings;

/// Transport or parse failure while retrieving the playlist document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("playlist transport: {0}")]
    Transport(#[from] curl::Error),
    #[error("malformed playlist xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The endpoint returned no document for this programme id.
    #[error("no playlist found for programme")]
    NotFound,
    /// The playlist parsed but lists no versions at all.
    #[error("playlist has no versions")]
    NoVersions,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// A resolved programme: optional display title plus version identifiers in
/// document order (`None` where an item had no identifier attribute).
#[derive(Debug, Clone)]
pub struct ResolvedProgramme {
    pub title: Option<String>,
    pub versions: Vec<Option<String>>,
}

impl ResolvedProgramme {
    /// First version that actually has an identifier. No preference among
    /// renditions beyond document order.
    pub fn first_usable_version(&self) -> Option<&str> {
        self.versions.iter().flatten().next().map(String::as_str)
    }
}

/// Fetches and parses the playlist for `pid`.
///
/// The playlist URL is the fixed prefix with the programme id appended. An
/// absent document is `NotFound`; a playlist with zero `<item>` elements is
/// `NoVersions`.
pub fn resolve_versions(
    pid: &str,
    playlist_prefix: &str,
    settings: &HttpSettings,
) -> Result<ResolvedProgramme, ResolveError> {
    let url = format!("{playlist_prefix}{pid}");
    tracing::debug!(%url, "fetching playlist");

    let body = fetch::fetch_document(&url, settings)?.ok_or(ResolveError::NotFound)?;
    let playlist = parse::parse_playlist(&body)?;

    if playlist.items.is_empty() {
        return Err(ResolveError::NoVersions);
    }
    tracing::debug!(
        title = playlist.title.as_deref().unwrap_or("<untitled>"),
        versions = playlist.items.len(),
        "playlist resolved"
    );

    Ok(ResolvedProgramme {
        title: playlist.title,
        versions: playlist.items,
    })
}
