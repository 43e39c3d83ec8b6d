use std::path::{Path, PathBuf};

use crate::error::Result;

/// Recursively walk a directory and collect candidate files.
///
/// Skips hidden files/directories (names starting with `.`) and anything
/// under `skip` (the data directory, so the index never eats its own
/// storage). Type and size eligibility are the orchestrator's job; every
/// regular file is returned. Results are absolute paths, sorted.
pub fn discover_files(root: &Path, skip: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let canonical_root = root.canonicalize()?;
    let skip: Vec<PathBuf> = skip
        .iter()
        .filter_map(|p| p.canonicalize().ok())
        .collect();

    let mut results = Vec::new();
    walk_dir(&canonical_root, &skip, &mut results)?;
    results.sort();
    Ok(results)
}

fn walk_dir(
    current: &Path,
    skip: &[PathBuf],
    results: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        // Skip hidden files and directories.
        if name.starts_with('.') {
            continue;
        }

        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            let dir = entry.path().canonicalize()?;
            if skip.iter().any(|s| dir.starts_with(s)) {
                continue;
            }
            walk_dir(&entry.path(), skip, results)?;
        } else if file_type.is_symlink() {
            let resolved = match entry.path().canonicalize() {
                Ok(p) => p,
                Err(_) => continue, // Skip broken symlinks
            };
            // Skip symlinks that point back into the tree (cycle prevention).
            if resolved.is_dir() {
                continue;
            }
            if resolved.is_file() {
                results.push(resolved);
            }
        } else if file_type.is_file() {
            results.push(entry.path().canonicalize()?);
        }
    }

    Ok(())
}
