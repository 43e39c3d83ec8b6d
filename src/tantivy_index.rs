use std::{path::Path, sync::Mutex};

use tantivy::{
    IndexReader,
    IndexWriter,
    TantivyDocument,
    collector::TopDocs,
    doc,
    query::QueryParser,
    schema::*,
    tokenizer::{
        LowerCaser,
        RemoveLongFilter,
        SimpleTokenizer,
        Stemmer,
        TextAnalyzer,
    },
};

use crate::{
    error::Result,
    index::QueryHit,
    record::FileRecord,
    text_util,
};

/// Field names used in the schema.
pub mod fields {
    pub const PATH: &str = "path";
    pub const FILE_NAME: &str = "file_name";
    pub const CONTENT_TYPE: &str = "content_type";
    pub const BODY: &str = "body";
    pub const INDEXED_AT: &str = "indexed_at";
}

const WRITER_MEMORY_BUDGET: usize = 15_000_000;

/// Tantivy-backed implementation of the [`crate::index::Index`] contract.
///
/// Owns its writer behind a mutex, so concurrent `put` calls from a
/// parallel batch serialize here; each `put` commits so that a caller
/// observing success knows the document is durable.
pub struct SearchIndex {
    index: tantivy::Index,
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    schema: Schema,
}

/// Resolved field handles for the schema.
#[derive(Clone, Copy)]
pub struct SchemaFields {
    pub path: Field,
    pub file_name: Field,
    pub content_type: Field,
    pub body: Field,
    pub indexed_at: Field,
}

fn build_schema() -> (Schema, SchemaFields) {
    let mut builder = Schema::builder();

    let path = builder.add_text_field(fields::PATH, STRING | STORED);

    let file_name_opts = TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer("en_stem")
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
        .set_stored();
    let file_name = builder.add_text_field(fields::FILE_NAME, file_name_opts);

    let content_type =
        builder.add_text_field(fields::CONTENT_TYPE, STRING | STORED);

    // Body is stored so query results can carry a snippet.
    let body_opts = TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer("en_stem")
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
        .set_stored();
    let body = builder.add_text_field(fields::BODY, body_opts);

    let indexed_at = builder.add_u64_field(fields::INDEXED_AT, STORED | FAST);

    let schema = builder.build();
    let fields = SchemaFields {
        path,
        file_name,
        content_type,
        body,
        indexed_at,
    };

    (schema, fields)
}

fn register_tokenizers(index: &tantivy::Index) {
    let en_stem = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(40))
        .filter(LowerCaser)
        .filter(Stemmer::new(tantivy::tokenizer::Language::English))
        .build();
    index.tokenizers().register("en_stem", en_stem);
}

impl SearchIndex {
    /// Open or create a search index at the given directory.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let (schema, _) = build_schema();

        let mmap_dir = tantivy::directory::MmapDirectory::open(dir)
            .map_err(|e| tantivy::TantivyError::SystemError(e.to_string()))?;
        let index = if tantivy::Index::exists(&mmap_dir)
            .map_err(|e| tantivy::TantivyError::SystemError(e.to_string()))?
        {
            tantivy::Index::open(mmap_dir)?
        } else {
            tantivy::Index::create(
                mmap_dir,
                schema.clone(),
                tantivy::IndexSettings::default(),
            )?
        };

        Self::finish_open(index, schema)
    }

    /// Create an in-memory search index (for testing).
    pub fn open_in_ram() -> Result<Self> {
        let (schema, _) = build_schema();
        let index = tantivy::Index::create_in_ram(schema.clone());
        Self::finish_open(index, schema)
    }

    fn finish_open(index: tantivy::Index, schema: Schema) -> Result<Self> {
        register_tokenizers(&index);
        let reader = index.reader()?;
        let writer = Mutex::new(index.writer(WRITER_MEMORY_BUDGET)?);

        Ok(Self {
            index,
            reader,
            writer,
            schema,
        })
    }

    /// Get the resolved field handles.
    pub fn fields(&self) -> SchemaFields {
        let f = |name: &str| self.schema.get_field(name).unwrap();
        SchemaFields {
            path: f(fields::PATH),
            file_name: f(fields::FILE_NAME),
            content_type: f(fields::CONTENT_TYPE),
            body: f(fields::BODY),
            indexed_at: f(fields::INDEXED_AT),
        }
    }

    /// Index or re-index `record`, replacing any prior document under the
    /// same path. The write is committed before returning.
    pub fn put(&self, record: &FileRecord) -> Result<()> {
        let f = self.fields();
        let path = record.path.to_string_lossy().to_string();

        let mut writer = self.writer.lock().unwrap();
        let term = tantivy::Term::from_field_text(f.path, &path);
        writer.delete_term(term);

        writer.add_document(doc!(
            f.path => path.as_str(),
            f.file_name => record.file_name.as_str(),
            f.content_type => record.content_type.as_str(),
            f.body => record.text.as_str(),
            f.indexed_at => record.indexed_at,
        ))?;
        writer.commit()?;

        Ok(())
    }

    /// Search with BM25 scoring over file names and body text.
    ///
    /// The query string is `terms` joined with spaces; `file_name` is
    /// boosted 2x. Returns up to `limit` hits starting `offset` in, each
    /// with a snippet around the first matching term.
    pub fn query(
        &self,
        terms: &[String],
        limit: usize,
        offset: usize,
    ) -> Result<Vec<QueryHit>> {
        let f = self.fields();
        self.reader.reload()?;
        let searcher = self.reader.searcher();

        let mut parser =
            QueryParser::for_index(&self.index, vec![f.file_name, f.body]);
        parser.set_field_boost(f.file_name, 2.0);

        let query_str = terms.join(" ");
        let (query, _errors) = parser.parse_query_lenient(&query_str);
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit).and_offset(offset))?;

        let mut results = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address)?;
            let body = extract_text(&doc, f.body);
            let (snippet, snippet_line) = text_util::extract_snippet(&body, terms)
                .unwrap_or((String::new(), 1));
            results.push(QueryHit {
                score,
                path: extract_text(&doc, f.path),
                content_type: extract_text(&doc, f.content_type),
                snippet,
                snippet_line,
            });
        }

        Ok(results)
    }

    /// Commit any pending writes and release the writer; called once at
    /// shutdown.
    pub fn close(&self) -> Result<()> {
        let mut writer = self.writer.lock().unwrap();
        writer.commit()?;
        Ok(())
    }
}

impl crate::index::Index for SearchIndex {
    fn put(&self, record: &FileRecord) -> Result<()> {
        SearchIndex::put(self, record)
    }

    fn query(
        &self,
        terms: &[String],
        limit: usize,
        offset: usize,
    ) -> Result<Vec<QueryHit>> {
        SearchIndex::query(self, terms, limit, offset)
    }

    fn close(&self) -> Result<()> {
        SearchIndex::close(self)
    }
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex").finish_non_exhaustive()
    }
}

fn extract_text(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}
