use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("data directory does not exist and could not be created: {}", .0.display())]
    DataDir(PathBuf),

    #[error("file too large to index: {} ({} bytes, limit {})", .path.display(), .size, .limit)]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("cannot determine a content type for {}", .0.display())]
    UnknownContentType(PathBuf),

    #[error("no extractor registered for content type \"{0}\"")]
    UnsupportedContentType(String),

    #[error("an extractor is already registered for \"{0}\"")]
    DuplicateContentType(String),

    #[error("{program} failed: {message}")]
    ExternalTool {
        program: &'static str,
        message: String,
    },

    #[error("failed to extract text from {}", .path.display())]
    Extraction {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to write {} to the search index", .path.display())]
    IndexWrite {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("{} was indexed but its fingerprint could not be recorded", .path.display())]
    FingerprintCommit {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}
