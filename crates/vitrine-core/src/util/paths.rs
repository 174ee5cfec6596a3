//! Generic path utilities.

use std::path::{Path, PathBuf};

/// Expand a leading `~` (and `~user`) in a path string.
///
/// Falls back to the input unchanged when the home directory is unknown.
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Resolve `path` against `base` unless it is already absolute.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use vitrine_core::util::paths::resolve_under;
///
/// assert_eq!(resolve_under(Path::new("/site"), "content"), PathBuf::from("/site/content"));
/// assert_eq!(resolve_under(Path::new("/site"), "/abs"), PathBuf::from("/abs"));
/// ```
pub fn resolve_under(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Walk up from `start` looking for a directory containing `marker`.
///
/// Returns the first ancestor (including `start`) where `start/marker` exists.
pub fn find_dir_with_marker(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).exists())
        .map(Path::to_path_buf)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_tilde_plain_path() {
        assert_eq!(expand_tilde("content/products"), PathBuf::from("content/products"));
    }

    #[test]
    fn test_expand_tilde_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/site"), home.join("site"));
        }
    }

    #[test]
    fn test_resolve_under_relative() {
        assert_eq!(
            resolve_under(Path::new("/srv/site"), "content"),
            PathBuf::from("/srv/site/content")
        );
    }

    #[test]
    fn test_find_dir_with_marker() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("vitrine.toml"), "").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_dir_with_marker(&nested, "vitrine.toml").unwrap();
        assert_eq!(found, dir.path());
    }

    #[test]
    fn test_find_dir_with_marker_missing() {
        let dir = TempDir::new().unwrap();
        assert!(find_dir_with_marker(dir.path(), "definitely-not-here.toml").is_none());
    }
}
