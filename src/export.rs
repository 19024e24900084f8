//! Saving and sharing rendered minutes

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::Result;

/// File name used when the caller names only a directory.
pub const DEFAULT_FILENAME: &str = "meeting_minutes.txt";

/// Write `markdown` as UTF-8 text. A directory target gets
/// [`DEFAULT_FILENAME`] inside it.
pub fn write_document(target: &Path, markdown: &str) -> Result<PathBuf> {
    let path = if target.is_dir() {
        target.join(DEFAULT_FILENAME)
    } else {
        target.to_path_buf()
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&path, markdown)?;
    tracing::info!(path = %path.display(), "Meeting minutes written");
    Ok(path)
}

/// HTML anchor that downloads `markdown` from a base64 data URI.
pub fn download_link(markdown: &str, filename: &str, link_text: &str) -> String {
    let encoded = STANDARD.encode(markdown.as_bytes());
    format!(
        "<a href=\"data:file/txt;base64,{}\" download=\"{}\">{}</a>",
        encoded, filename, link_text
    )
}
