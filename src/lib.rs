//! scour - incremental full-text indexing for the files on your disk.
//!
//! scour extracts searchable text from heterogeneous files (plain text
//! directly, images and PDFs via external OCR tooling), feeds it to a local
//! [Tantivy](https://github.com/quickwit-oss/tantivy) index, and records a
//! SHA-256 fingerprint per file so unchanged files are never re-extracted or
//! re-submitted.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use scour::{
//!     ContentTypeMap, DataDir, ExtractorRegistry, FingerprintStore,
//!     Processor, SearchIndex, extract::OcrConfig,
//!     processor::DEFAULT_MAX_FILE_SIZE,
//! };
//!
//! let data_dir = DataDir::resolve(None).unwrap();
//! let index = Arc::new(SearchIndex::open(&data_dir.index_dir().unwrap()).unwrap());
//! let fingerprints =
//!     FingerprintStore::open(&data_dir.fingerprint_dir().unwrap()).unwrap();
//!
//! let processor = Processor::new(
//!     ExtractorRegistry::with_defaults(OcrConfig::default()),
//!     ContentTypeMap::new(),
//!     fingerprints,
//!     index.clone(),
//!     DEFAULT_MAX_FILE_SIZE,
//! );
//!
//! processor.process_file(std::path::Path::new("notes.txt")).unwrap();
//! let hits = index.query(&["hello".to_string()], 10, 0).unwrap();
//! for hit in &hits {
//!     println!("{} (score: {:.3})", hit.path, hit.score);
//! }
//! ```

pub mod cli;
pub mod content_type;
pub mod data_dir;
pub mod error;
pub mod extract;
pub mod fingerprint;
pub mod index;
pub mod processor;
pub mod record;
pub mod registry;
pub mod tantivy_index;
pub mod text_util;
pub mod walker;

pub use content_type::ContentTypeMap;
pub use data_dir::DataDir;
pub use error::{Error, Result};
pub use fingerprint::{ContentDigest, FingerprintStore};
pub use index::{Index, QueryHit};
pub use processor::{BatchReport, Outcome, Processor};
pub use record::FileRecord;
pub use registry::ExtractorRegistry;
pub use tantivy_index::SearchIndex;
