use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

use serde::Serialize;

/// One processed file, as handed to the search index.
///
/// Constructed once per processing attempt and immutable afterwards; the
/// index receives it by reference and keeps no shared mutable state with the
/// orchestrator.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// Absolute normalized path; the index key.
    pub path: PathBuf,
    /// Base name of the file.
    pub file_name: String,
    /// Declared content type (e.g. `"text/plain"`).
    pub content_type: String,
    /// Extracted plain text.
    pub text: String,
    /// When this record was built, in seconds since the Unix epoch.
    pub indexed_at: u64,
}

impl FileRecord {
    pub fn new(path: PathBuf, content_type: String, text: String) -> Self {
        let file_name = base_name(&path);
        let indexed_at = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self {
            path,
            file_name,
            content_type,
            text,
            indexed_at,
        }
    }
}

/// The file's base name as a string, lossily decoded.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
