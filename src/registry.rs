use std::{collections::HashMap, path::Path, sync::Arc};

use crate::{
    error::{Error, Result},
    extract::{self, OcrConfig},
};

/// A text-extraction strategy: file path in, plain text out.
///
/// Extractors must not mutate the source file; they may create and clean up
/// their own temporary files.
pub type Extractor = Arc<dyn Fn(&Path) -> Result<String> + Send + Sync>;

/// Maps content-type keys to extraction strategies.
///
/// Keys are either full types (`"application/pdf"`) or coarse categories
/// (`"image"`). Lookup is exact-first with category fallback; registration
/// is first-come, duplicates are rejected. The registry is an explicit
/// instance constructed once at startup and read-only afterwards.
pub struct ExtractorRegistry {
    handlers: HashMap<String, Extractor>,
}

impl ExtractorRegistry {
    /// An empty registry with no handlers at all.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// A registry with the built-in defaults: plain-text reads for the
    /// `text` category and `application/javascript`, OCR for the `image`
    /// category and `application/pdf`.
    pub fn with_defaults(ocr: OcrConfig) -> Self {
        let mut handlers: HashMap<String, Extractor> = HashMap::new();
        handlers.insert("text".to_string(), Arc::new(extract::plain_text));
        handlers.insert(
            "application/javascript".to_string(),
            Arc::new(extract::plain_text),
        );

        let config = ocr.clone();
        handlers.insert(
            "image".to_string(),
            Arc::new(move |path: &Path| extract::ocr(&config, path)),
        );
        handlers.insert(
            "application/pdf".to_string(),
            Arc::new(move |path: &Path| extract::ocr(&ocr, path)),
        );

        Self { handlers }
    }

    /// Register an extractor for `type_key`. Fails if the key is already
    /// present; the existing registration is left untouched.
    pub fn register(&mut self, type_key: &str, extractor: Extractor) -> Result<()> {
        if self.handlers.contains_key(type_key) {
            return Err(Error::DuplicateContentType(type_key.to_string()));
        }
        self.handlers.insert(type_key.to_string(), extractor);
        Ok(())
    }

    /// Resolve an extractor: exact match on `full_type` first, then the
    /// coarser `category`. A specific registration always wins over a
    /// category default. Fails naming the original `full_type` when neither
    /// is registered.
    pub fn resolve(&self, full_type: &str, category: &str) -> Result<Extractor> {
        if let Some(extractor) = self.handlers.get(full_type) {
            return Ok(extractor.clone());
        }
        if let Some(extractor) = self.handlers.get(category) {
            return Ok(extractor.clone());
        }
        Err(Error::UnsupportedContentType(full_type.to_string()))
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.handlers.keys().collect();
        keys.sort();
        f.debug_struct("ExtractorRegistry")
            .field("keys", &keys)
            .finish()
    }
}
