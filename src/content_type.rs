use std::{collections::HashMap, path::Path};

use crate::error::{Error, Result};

/// Extension-to-content-type resolution with user overrides.
///
/// Overrides are consulted before the standard `mime_guess` table, so a
/// custom mapping can redirect an extension the table already knows about.
#[derive(Debug, Clone)]
pub struct ContentTypeMap {
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Build the map with the built-in overrides (org-mode files are not in
    /// the standard table).
    pub fn new() -> Self {
        let mut map = Self {
            overrides: HashMap::new(),
        };
        map.add_mapping("org", "text/x-org");
        map.add_mapping("org_archive", "text/x-org");
        map
    }

    /// Map `ext` (with or without a leading dot) to `content_type`,
    /// replacing any prior mapping for that extension.
    pub fn add_mapping(&mut self, ext: &str, content_type: &str) {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        self.overrides.insert(ext, content_type.to_string());
    }

    /// The declared content type for a path, derived from its extension.
    /// Returns `None` when neither the overrides nor the standard table
    /// know the extension.
    pub fn content_type_of(&self, path: &Path) -> Option<String> {
        if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && let Some(mapped) = self.overrides.get(&ext.to_ascii_lowercase())
        {
            return Some(mapped.clone());
        }
        mime_guess::from_path(path)
            .first_raw()
            .map(|m| m.to_string())
    }
}

impl Default for ContentTypeMap {
    fn default() -> Self {
        Self::new()
    }
}

/// The coarse category of a content type: the substring before the first
/// `/` (e.g. `"image"` for `"image/png"`).
pub fn category(full_type: &str) -> &str {
    full_type.split('/').next().unwrap_or(full_type)
}

/// Parse a `EXT=TYPE` mapping as supplied on the command line
/// (e.g. `.org=text/x-org`).
pub fn parse_mapping(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((ext, mime)) if !ext.is_empty() && !mime.is_empty() => {
            Ok((ext.to_string(), mime.to_string()))
        }
        _ => Err(Error::Config(format!(
            "invalid content-type mapping \"{s}\" (expected EXT=TYPE)"
        ))),
    }
}
