//! Scratch HTML pages in the platform temp directory.
//!
//! `open_new_window` snapshots its HTML into a `.html` file and loads it
//! via a `file://` URL. The files are intentionally never deleted; that
//! matches the shipped behavior of the page this shell hosts.

use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `html` to a fresh `.html` file in the temp directory and keep
/// it on disk. Returns the file's path.
pub fn write_scratch_page(html: &str) -> std::io::Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("repair-detail-")
        .suffix(".html")
        .tempfile()?;
    file.write_all(html.as_bytes())?;
    let (_, path) = file.keep().map_err(|e| e.error)?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "scratch page written");
    Ok(path)
}

/// Build a `file://` URL for a local path.
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}
