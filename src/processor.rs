use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    content_type::{self, ContentTypeMap},
    error::{Error, Result},
    fingerprint::{ContentDigest, FingerprintStore},
    index::Index,
    record::{self, FileRecord},
    registry::ExtractorRegistry,
};

/// Default upper bound on the size of a file eligible for indexing.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

/// What `process_file` did with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The file was extracted, indexed, and fingerprinted.
    Indexed,
    /// The file's content matched its fingerprint; nothing was done.
    Unchanged,
}

/// Accumulated result of processing a batch of files.
///
/// One file's failure never aborts its siblings; failures are collected
/// here for the caller to report.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub indexed: usize,
    pub unchanged: usize,
    pub failures: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    pub fn merge(&mut self, other: BatchReport) {
        self.indexed += other.indexed;
        self.unchanged += other.unchanged;
        self.failures.extend(other.failures);
    }

    fn record(&mut self, path: &Path, result: Result<Outcome>) {
        match result {
            Ok(Outcome::Indexed) => self.indexed += 1,
            Ok(Outcome::Unchanged) => self.unchanged += 1,
            Err(e) => self.failures.push((path.to_path_buf(), e)),
        }
    }
}

/// Drives one file at a time through eligibility check, change detection,
/// extraction, index submission, and fingerprint commit.
///
/// Holds the registry and content-type map read-only after construction;
/// the fingerprint store and the index are the only cross-file state.
pub struct Processor {
    registry: ExtractorRegistry,
    types: ContentTypeMap,
    fingerprints: FingerprintStore,
    index: Arc<dyn Index>,
    max_file_size: u64,
    // Serializes concurrent calls on the same path; distinct paths run
    // independently.
    path_locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl Processor {
    pub fn new(
        registry: ExtractorRegistry,
        types: ContentTypeMap,
        fingerprints: FingerprintStore,
        index: Arc<dyn Index>,
        max_file_size: u64,
    ) -> Self {
        Self {
            registry,
            types,
            fingerprints,
            index,
            max_file_size,
            path_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Process a single file: skip it cheaply if its content is unchanged
    /// since the last successful run, otherwise extract its text, submit it
    /// to the index, and only then record its fingerprint.
    ///
    /// A failure at any step leaves the file un-fingerprinted (except a
    /// failure of the fingerprint write itself, which arrives after the
    /// document is already safely indexed), so a rerun retries it.
    pub fn process_file(&self, path: &Path) -> Result<Outcome> {
        // Normalize the spelling up front so `./a` and `a` share one lock
        // and one replacement key in the index.
        let path = path.canonicalize()?;

        let lock = self.path_lock(&path);
        let _guard = lock.lock().unwrap();

        let size = std::fs::metadata(&path)?.len();
        if size > self.max_file_size {
            return Err(Error::TooLarge {
                path,
                size,
                limit: self.max_file_size,
            });
        }

        let digest = ContentDigest::of_file(&path)?;
        let key = record::base_name(&path);
        if self.fingerprints.has_matching(&key, &digest)? {
            debug!("already indexed, skipping {}", path.display());
            return Ok(Outcome::Unchanged);
        }

        let full_type = self
            .types
            .content_type_of(&path)
            .ok_or_else(|| Error::UnknownContentType(path.clone()))?;
        let category = content_type::category(&full_type);
        debug!("detected content type {full_type:?} for {}", path.display());

        let extractor = self.registry.resolve(&full_type, category)?;
        let text = extractor(&path).map_err(|e| Error::Extraction {
            path: path.clone(),
            source: Box::new(e),
        })?;

        let record = FileRecord::new(path.clone(), full_type, text);
        info!("indexing {}", record.path.display());
        self.index.put(&record).map_err(|e| Error::IndexWrite {
            path: path.clone(),
            source: Box::new(e),
        })?;

        // Committed strictly after the index write succeeded: a stored
        // fingerprint always implies an indexed document. The reverse
        // failure (indexed but not fingerprinted) only costs a redundant
        // reprocess next run.
        self.fingerprints
            .commit(&key, &digest)
            .map_err(|e| Error::FingerprintCommit {
                path,
                source: Box::new(e),
            })?;

        Ok(Outcome::Indexed)
    }

    /// Process a batch of files in parallel. Errors are contained per file.
    pub fn process_many(&self, paths: &[PathBuf]) -> BatchReport {
        let results: Vec<(PathBuf, Result<Outcome>)> = paths
            .par_iter()
            .map(|path| (path.clone(), self.process_file(path)))
            .collect();

        let mut report = BatchReport::default();
        for (path, result) in results {
            report.record(&path, result);
        }
        report
    }

    fn path_lock(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.path_locks.lock().unwrap();
        // Entries nobody else holds are finished with; drop them so the
        // map stays bounded across long batches.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(path.to_path_buf()).or_default().clone()
    }
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("max_file_size", &self.max_file_size)
            .finish_non_exhaustive()
    }
}
