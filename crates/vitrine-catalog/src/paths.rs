//! Static path enumeration.
//!
//! Static site generation needs the list of routes before any page renders.
//! [`enumerate_identifiers`] gets them from front matter alone, skipping the
//! body render, while applying the same validation as a full load so both
//! agree on which identifiers exist and in what order.

use std::fmt;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use vitrine_content::extract_frontmatter;
use vitrine_core::{Result, discover_files};

use crate::config::CategoryConfig;
use crate::document::check_identifier;
use crate::meta::{DocumentMeta, parse_metadata};
use crate::repository::{check_unique, read_source};

/// Route parameters of one document page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaticPath {
    /// Category name, the first path segment.
    pub category: String,
    /// Document identifier.
    pub slug: String,
}

impl StaticPath {
    /// Route for `slug` in `category`.
    pub fn new(category: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            slug: slug.into(),
        }
    }

    /// URL path, `/{category}/{slug}`.
    pub fn route(&self) -> String {
        format!("/{}/{}", self.category, self.slug)
    }
}

impl fmt::Display for StaticPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.category, self.slug)
    }
}

struct Entry {
    identifier: String,
    order: i64,
    source: PathBuf,
}

async fn scan_entry<M: DocumentMeta>(path: PathBuf) -> Result<Entry> {
    let content = read_source(&path).await?;
    let parsed = extract_frontmatter(&content)
        .and_then(|fm| parse_metadata::<M>(&fm))
        .and_then(|meta| {
            check_identifier(meta.identifier())?;
            Ok(meta)
        })
        .map_err(|e| e.in_file(&path))?;

    Ok(Entry {
        identifier: parsed.identifier().to_string(),
        order: parsed.order(),
        source: path,
    })
}

/// Identifiers of a category, from front matter only.
///
/// Returns the same identifiers in the same order as
/// [`ContentRepository::list_all`](crate::ContentRepository::list_all) would.
/// An absent directory yields an empty list.
///
/// # Errors
///
/// Malformed front matter, invalid metadata, or a duplicate identifier, each
/// naming the offending file.
pub async fn enumerate_identifiers<M: DocumentMeta>(
    category: &str,
    root: &Path,
    config: &CategoryConfig,
) -> Result<Vec<String>> {
    let dir = config.resolve_dir(root);
    let files = discover_files(&dir, &config.extensions).await?;

    let mut entries = try_join_all(files.into_iter().map(scan_entry::<M>)).await?;
    check_unique(
        entries
            .iter()
            .map(|e| (e.identifier.as_str(), e.source.as_path())),
    )?;

    // Entries are in discovery order; a stable sort keeps it for ties.
    entries.sort_by_key(|e| e.order);

    log::debug!(
        "Enumerated {} {category} identifier(s) in {}",
        entries.len(),
        dir.display()
    );
    Ok(entries.into_iter().map(|e| e.identifier).collect())
}

/// Route parameters for every document of a category.
pub async fn static_paths<M: DocumentMeta>(
    category: &str,
    root: &Path,
    config: &CategoryConfig,
) -> Result<Vec<StaticPath>> {
    Ok(enumerate_identifiers::<M>(category, root, config)
        .await?
        .into_iter()
        .map(|slug| StaticPath::new(category, slug))
        .collect())
}
