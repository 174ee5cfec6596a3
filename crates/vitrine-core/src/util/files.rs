//! Content file discovery.
//!
//! A category directory is flat: every regular file directly inside it whose
//! extension matches is one document. Subdirectories are ignored.
//!
//! Discovery order is lexicographic by file name, which gives content authors
//! a predictable tie-break when two documents share an `order` value.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Find all content files with the given extensions directly inside `dir`.
///
/// Extensions are matched case-insensitively and given without dots.
///
/// # Returns
///
/// - `Ok(vec![])` if `dir` does not exist. An absent category is not an
///   error, so a site can ship before a category has any content.
/// - `Err(Error::Io)` if `dir` exists but is not a readable directory.
/// - Otherwise the matching paths, sorted by file name.
pub async fn discover_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let metadata = match tokio::fs::metadata(dir).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Content directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::io_with_path(e, dir)),
    };

    if !metadata.is_dir() {
        return Err(Error::io_with_path(
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            dir,
        ));
    }

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| Error::io_with_path(e, dir))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io_with_path(e, dir))?
    {
        let path = entry.path();
        if !has_extension(&path, extensions) {
            log::trace!("Skipping {} (extension not accepted)", path.display());
            continue;
        }

        // Follows symlinks, so a linked directory is skipped like a real one
        match tokio::fs::metadata(&path).await {
            Ok(m) if m.is_file() => files.push(path),
            Ok(_) => log::debug!("Skipping {} (not a regular file)", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Skipping {} (dangling symlink)", path.display());
            }
            Err(e) => return Err(Error::io_with_path(e, &path)),
        }
    }

    // Sort for deterministic discovery order
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Check whether `path` has one of `extensions` (case-insensitive, no dots).
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
