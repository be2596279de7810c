//! Pull-parse of the playlist XML.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::FetchError;

/// Parsed playlist: first `<title>` text plus the `identifier` attribute of
/// every `<item>`, in document order.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    pub title: Option<String>,
    pub items: Vec<Option<String>>,
}

pub(super) fn parse_playlist(bytes: &[u8]) -> Result<Playlist, FetchError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut playlist = Playlist::default();
    let mut in_first_title = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"title" if playlist.title.is_none() => in_first_title = true,
                b"item" => playlist.items.push(identifier_attr(&e)?),
                _ => {}
            },
            // Self-closing items still count as versions.
            Event::Empty(e) if e.local_name().as_ref() == b"item" => {
                playlist.items.push(identifier_attr(&e)?)
            }
            Event::Text(t) if in_first_title => {
                playlist.title = Some(t.unescape()?.into_owned());
                in_first_title = false;
            }
            Event::End(e) if e.local_name().as_ref() == b"title" => in_first_title = false,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(playlist)
}

fn identifier_attr(e: &BytesStart<'_>) -> Result<Option<String>, FetchError> {
    let attr = e
        .try_get_attribute("identifier")
        .map_err(quick_xml::Error::from)?;
    match attr {
        Some(a) => Ok(Some(a.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}
