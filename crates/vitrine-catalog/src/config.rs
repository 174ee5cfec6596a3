//! Category → directory mapping.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vitrine_core::util::paths::resolve_under;

/// Extensions accepted when a category does not list its own.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["mdx", "md"];

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

/// Where one category's documents live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Directory holding the documents. Relative paths resolve against the
    /// content root.
    pub dir: PathBuf,

    /// File extensions to load, without dots.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl CategoryConfig {
    /// Category stored in `dir` with the default extensions.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extensions: default_extensions(),
        }
    }

    /// Replace the accepted extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Absolute (or root-relative) directory for this category.
    pub fn resolve_dir(&self, root: &Path) -> PathBuf {
        resolve_under(root, &self.dir)
    }
}

/// Every category the repository loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Content root.
    pub root: PathBuf,

    /// Category name → location.
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryConfig>,
}

impl CatalogConfig {
    /// Empty catalog rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            categories: BTreeMap::new(),
        }
    }

    /// Add (or replace) a category.
    pub fn with_category(mut self, name: impl Into<String>, category: CategoryConfig) -> Self {
        self.categories.insert(name.into(), category);
        self
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.get(name)
    }

    /// Resolved directory of a category.
    pub fn category_dir(&self, name: &str) -> Option<PathBuf> {
        self.category(name).map(|c| c.resolve_dir(&self.root))
    }
}
