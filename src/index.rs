use serde::Serialize;

use crate::{error::Result, record::FileRecord};

/// A ranked hit returned from a query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryHit {
    pub score: f32,
    pub path: String,
    pub content_type: String,
    /// A few lines of context around the first matching term.
    pub snippet: String,
    /// 1-indexed line where the snippet starts.
    pub snippet_line: usize,
}

/// The search-index collaborator the orchestrator writes to.
///
/// Implementations serialize their own writes internally; callers only need
/// per-path ordering, which the orchestrator provides.
pub trait Index: Send + Sync {
    /// Index or re-index the document keyed by its path, replacing any
    /// prior version under that key.
    fn put(&self, record: &FileRecord) -> Result<()>;

    /// Evaluate the query formed by joining `terms` with spaces. Results
    /// are ranked, bounded by `limit`, and start `offset` hits in.
    fn query(&self, terms: &[String], limit: usize, offset: usize) -> Result<Vec<QueryHit>>;

    /// Release underlying storage resources; called once at shutdown.
    fn close(&self) -> Result<()>;
}
