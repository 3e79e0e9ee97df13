//! Static file resolution under a single root directory.

use std::path::{Path, PathBuf};

/// Resolves request paths to file contents under a base directory.
///
/// `/` maps to `index.html`; any other path maps to the file at the same
/// relative location under the root.
pub struct StaticRoot {
    base_dir: PathBuf,
}

impl StaticRoot {
    /// Create a static root serving files from `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a request path to MIME type and content bytes.
    ///
    /// Returns `None` when the file does not exist or the path escapes
    /// the root.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, Vec<u8>)> {
        let clean = path.trim_start_matches('/');
        let clean = if clean.is_empty() { "index.html" } else { clean };

        let file_path = self.base_dir.join(clean);

        // Prevent directory traversal (including symlink bypass).
        // Canonicalize both paths to resolve symlinks, `..`, etc.
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }
        if !canonical_file.is_file() {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some((mime_from_extension(&file_path), data))
    }

    /// The directory files are served from.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
