//! Minimal HTTP/1.1 server mimicking the three pipeline endpoints for
//! integration tests.
//!
//! Routes: `/playlist/<pid>` serves a configurable XML body, `/auth/<version>`
//! answers with a redirect whose `Location` header points at the media route,
//! and `/media/...` serves ranged GETs with `Content-Range` over a static
//! body. Every request (method, path, `Range` header) is recorded so tests
//! can assert on the exact ranges the engine sent.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct MediaServerOptions {
    /// Body served for playlist requests; `None` serves an empty body.
    pub playlist_xml: Option<Vec<u8>>,
    /// If false, the auth route answers 200 without a `Location` header.
    pub auth_redirects: bool,
    /// If false, media responses omit `Content-Range`.
    pub send_content_range: bool,
}

impl Default for MediaServerOptions {
    fn default() -> Self {
        Self {
            playlist_xml: None,
            auth_redirects: true,
            send_content_range: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub range: Option<String>,
}

pub struct MediaServer {
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:12345`.
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MediaServer {
    /// Starts a server in a background thread serving `media_body` on the
    /// media route. Runs until the process exits.
    pub fn start(media_body: Vec<u8>, opts: MediaServerOptions) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{}", port);
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let media_body = Arc::new(media_body);
        let base = base_url.clone();
        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let body = Arc::clone(&media_body);
                let base = base.clone();
                let opts = opts.clone();
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, &body, &base, &opts, &log));
            }
        });

        Self { base_url, requests }
    }

    pub fn playlist_prefix(&self) -> String {
        format!("{}/playlist/", self.base_url)
    }

    pub fn media_selector_prefix(&self) -> String {
        format!("{}/auth", self.base_url)
    }

    pub fn media_url(&self) -> String {
        format!("{}/media/stream.mov", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `Range` header values of requests that hit the media route, in order.
    pub fn media_ranges(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with("/media/"))
            .filter_map(|r| r.range)
            .collect()
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    media_body: &[u8],
    base_url: &str,
    opts: &MediaServerOptions,
    log: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let (method, path, range) = parse_request(request);
    log.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.to_string(),
        range: range_header(request),
    });

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\n\r\n");
        return;
    }

    if path.starts_with("/playlist/") {
        let body: &[u8] = opts.playlist_xml.as_deref().unwrap_or(b"");
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/xml\r\nContent-Length: {}\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(body);
        return;
    }

    if path.starts_with("/auth/") {
        let response = if opts.auth_redirects {
            format!(
                "HTTP/1.1 302 Found\r\nLocation: {}/media/stream.mov\r\nContent-Length: 0\r\n\r\n",
                base_url
            )
        } else {
            "HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n".to_string()
        };
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if path.starts_with("/media/") {
        serve_media(&mut stream, media_body, range, opts.send_content_range);
        return;
    }

    let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
}

fn serve_media(
    stream: &mut std::net::TcpStream,
    body: &[u8],
    range: Option<(u64, u64)>,
    send_content_range: bool,
) {
    let total = body.len() as u64;
    let (status, start, end_incl) = match range {
        Some((start, end_incl)) => {
            let start = start.min(total);
            let end_incl = end_incl.min(total.saturating_sub(1));
            if start > end_incl {
                let _ = stream.write_all(
                    format!(
                        "HTTP/1.1 416 Range Not Satisfiable\r\nContent-Length: 0\r\nContent-Range: bytes */{}\r\n\r\n",
                        total
                    )
                    .as_bytes(),
                );
                return;
            }
            ("206 Partial Content", start, end_incl)
        }
        None => ("200 OK", 0, total.saturating_sub(1)),
    };

    let slice = if body.is_empty() {
        &body[0..0]
    } else {
        &body[start as usize..=(end_incl as usize).min(body.len() - 1)]
    };
    let content_range = if send_content_range {
        format!("Content-Range: bytes {}-{}/{}\r\n", start, end_incl, total)
    } else {
        String::new()
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}\r\n",
        status,
        slice.len(),
        content_range
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(slice);
}

/// Returns (method, path, optional (start, end_inclusive) for Range: bytes=X-Y).
fn parse_request(request: &str) -> (&str, &str, Option<(u64, u64)>) {
    let mut method = "";
    let mut path = "";
    let mut range = None;
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if method.is_empty() {
            let mut parts = line.split_whitespace();
            method = parts.next().unwrap_or("");
            path = parts.next().unwrap_or("");
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("range") {
                let value = value.trim();
                if let Some(part) = value.strip_prefix("bytes=") {
                    if let Some((a, b)) = part.split_once('-') {
                        let start = a.trim().parse::<u64>().unwrap_or(0);
                        let end = b.trim();
                        let end_incl = if end.is_empty() {
                            u64::MAX
                        } else {
                            end.parse::<u64>().unwrap_or(0)
                        };
                        range = Some((start, end_incl));
                    }
                }
            }
        }
    }
    (method, path, range)
}

/// Raw `Range` header value (e.g. `bytes=0-1`), for request logging.
fn range_header(request: &str) -> Option<String> {
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("range") {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}
