//! Destination modeling and filename derivation from the programme title.

use std::path::{Path, PathBuf};

/// Extension for the downloaded stream container.
pub const MEDIA_EXTENSION: &str = "mov";

/// Where a download lands: destination directory plus derived filename.
/// Threaded through the pipeline as a value so concurrent downloads never
/// share naming state.
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    pub dir: PathBuf,
    pub filename: String,
}

impl DownloadTarget {
    /// Builds a target from a raw title (or any fallback stem, e.g. the pid).
    pub fn from_title(dir: &Path, raw_stem: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            filename: format!("{}.{}", sanitize_title_stem(raw_stem), MEDIA_EXTENSION),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }
}

/// Sanitizes a programme title into a filename stem.
///
/// A colon becomes ` -` and swallows one immediately-following space
/// (`"My Show: Part One"` → `"My Show -Part One"`); everything outside
/// letters, digits, spaces, and hyphens is dropped; the result is trimmed.
pub fn sanitize_title_stem(title: &str) -> String {
    let mut out = String::with_capacity(title.len() + 4);
    let mut chars = title.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' => {
                out.push_str(" -");
                if chars.peek() == Some(&' ') {
                    chars.next();
                }
            }
            c if c.is_ascii_alphanumeric() || c == ' ' || c == '-' => out.push(c),
            _ => {}
        }
    }

    out.trim().to_string()
}
