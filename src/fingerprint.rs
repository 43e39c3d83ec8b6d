use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};

use crate::error::Result;

/// Length in bytes of a stored digest (SHA-256).
pub const DIGEST_LEN: usize = 32;

/// SHA-256 digest of a file's full byte content.
///
/// Computed fresh on every processing attempt; the only copy that survives
/// across runs is the one the [`FingerprintStore`] persists after a
/// successful index write.
#[derive(Clone, PartialEq, Eq)]
pub struct ContentDigest([u8; DIGEST_LEN]);

impl ContentDigest {
    /// Digest a file by streaming its entire content through the hasher.
    ///
    /// Fails if the file cannot be opened or read; a partial read surfaces
    /// as an error rather than a truncated digest.
    pub fn of_file(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        std::io::copy(&mut file, &mut hasher)?;
        Ok(Self(hasher.finalize().into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContentDigest(")?;
        for b in &self.0[..4] {
            write!(f, "{b:02x}")?;
        }
        write!(f, "..)")
    }
}

/// Durable record of "last successfully indexed content" per file.
///
/// One entry per indexed file, stored under `root`, named by the file's base
/// name, containing the raw digest bytes verbatim. An entry exists for a key
/// only if that exact content was successfully indexed in a prior run.
#[derive(Debug)]
pub struct FingerprintStore {
    root: PathBuf,
}

impl FingerprintStore {
    pub fn open(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// True iff an entry exists for `key` and its stored bytes are equal in
    /// length and content to `digest`. A missing entry or a length mismatch
    /// is "no match", not an error.
    pub fn has_matching(&self, key: &str, digest: &ContentDigest) -> Result<bool> {
        let stored = match std::fs::read(self.root.join(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        Ok(stored.as_slice() == digest.as_bytes())
    }

    /// Persist `digest` as the entry for `key`, fully replacing any prior
    /// entry. The write goes to a temporary file in the same directory and
    /// is renamed into place, so a concurrent reader observes either the old
    /// or the new entry, never a partial one.
    pub fn commit(&self, key: &str, digest: &ContentDigest) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(digest.as_bytes())?;
        tmp.persist(self.root.join(key))
            .map_err(|e| crate::error::Error::Io(e.error))?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
