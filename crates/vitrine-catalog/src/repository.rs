//! Content repository.
//!
//! [`ContentRepository`] is loaded once at startup from a [`CatalogConfig`]
//! and then only read. Loading is all-or-nothing: the first malformed or
//! invalid file in any category fails the whole load, naming the file. A
//! category whose directory does not exist loads as empty.
//!
//! # Example
//!
//! ```rust,no_run
//! use vitrine_catalog::{CatalogConfig, CategoryConfig, ContentRepository, ProductMeta};
//! use vitrine_content::RenderOptions;
//!
//! # async fn run() -> vitrine_core::Result<()> {
//! let config = CatalogConfig::new("content")
//!     .with_category("products", CategoryConfig::new("products"));
//! let repo: ContentRepository<ProductMeta> =
//!     ContentRepository::load(&config, &RenderOptions::default()).await?;
//!
//! for product in repo.list_all("products") {
//!     println!("{} [{}]", product.metadata.title, product.metadata.status.label());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use vitrine_content::RenderOptions;
use vitrine_core::{Error, Result, discover_files};

use crate::config::{CatalogConfig, CategoryConfig};
use crate::document::Document;
use crate::meta::DocumentMeta;
use crate::paths::StaticPath;

/// Loaded documents of one category, in listing order.
#[derive(Debug, Clone)]
struct Category<M> {
    documents: Vec<Document<M>>,
    by_id: HashMap<String, usize>,
}

impl<M> Category<M> {
    fn new(documents: Vec<Document<M>>) -> Self {
        let by_id = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.identifier.clone(), i))
            .collect();
        Self { documents, by_id }
    }
}

/// Immutable, in-memory view of every configured category.
#[derive(Debug, Clone)]
pub struct ContentRepository<M> {
    categories: BTreeMap<String, Category<M>>,
}

impl<M> Default for ContentRepository<M> {
    fn default() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }
}

impl<M: DocumentMeta> ContentRepository<M> {
    /// Load every category in `config`.
    ///
    /// # Errors
    ///
    /// The first `ContentParse`, `ContentValidation` or `Io` error from any
    /// category. Nothing is returned partially loaded.
    pub async fn load(config: &CatalogConfig, options: &RenderOptions) -> Result<Self> {
        let mut repo = Self::default();

        for (name, category) in &config.categories {
            let documents = load_category(name, category, &config.root, options).await?;
            repo.insert(name.clone(), documents);
        }

        log::info!(
            "Loaded {} document(s) in {} categor{}",
            repo.len(),
            repo.categories.len(),
            if repo.categories.len() == 1 { "y" } else { "ies" }
        );

        Ok(repo)
    }

    /// Build a repository from already loaded categories.
    ///
    /// Documents are re-sorted and checked for duplicate identifiers, so the
    /// result holds the same invariants as [`ContentRepository::load`].
    pub fn from_documents<I>(categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<Document<M>>)>,
    {
        let mut repo = Self::default();
        for (name, mut documents) in categories {
            check_unique(documents.iter().map(|d| (d.identifier.as_str(), d.source.as_path())))?;
            sort_documents(&mut documents);
            repo.insert(name, documents);
        }
        Ok(repo)
    }
}

impl<M> ContentRepository<M> {
    fn insert(&mut self, name: String, documents: Vec<Document<M>>) {
        self.categories.insert(name, Category::new(documents));
    }

    /// All documents of `category`, sorted by order then discovery.
    ///
    /// Empty for an unknown category.
    pub fn list_all(&self, category: &str) -> &[Document<M>] {
        self.categories
            .get(category)
            .map(|c| c.documents.as_slice())
            .unwrap_or_default()
    }

    /// Look up a document by identifier. `None` if there is no such document.
    pub fn get(&self, category: &str, identifier: &str) -> Option<&Document<M>> {
        let category = self.categories.get(category)?;
        category
            .by_id
            .get(identifier)
            .map(|&i| &category.documents[i])
    }

    /// Identifiers of `category`, in [`list_all`](Self::list_all) order.
    pub fn identifiers(&self, category: &str) -> Vec<&str> {
        self.list_all(category)
            .iter()
            .map(|d| d.identifier.as_str())
            .collect()
    }

    /// Routes for every document of `category`.
    pub fn static_paths(&self, category: &str) -> Vec<StaticPath> {
        self.identifiers(category)
            .into_iter()
            .map(|id| StaticPath::new(category, id))
            .collect()
    }

    /// Names of the loaded categories, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Total number of documents across categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(|c| c.documents.len()).sum()
    }

    /// Returns `true` if no category holds any document.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load and validate one category.
///
/// Files are read and parsed concurrently; the result is in listing order.
pub async fn load_category<M: DocumentMeta>(
    name: &str,
    category: &CategoryConfig,
    root: &Path,
    options: &RenderOptions,
) -> Result<Vec<Document<M>>> {
    let dir = category.resolve_dir(root);
    let files = discover_files(&dir, &category.extensions).await?;
    log::debug!(
        "Category '{name}': {} file(s) in {}",
        files.len(),
        dir.display()
    );

    let tasks = files
        .into_iter()
        .enumerate()
        .map(|(index, path)| load_document::<M>(path, index, options));
    let mut documents = try_join_all(tasks).await?;

    check_unique(documents.iter().map(|d| (d.identifier.as_str(), d.source.as_path())))?;
    sort_documents(&mut documents);

    log::info!("Loaded {} {name} document(s)", documents.len());
    Ok(documents)
}

async fn load_document<M: DocumentMeta>(
    path: PathBuf,
    discovery_index: usize,
    options: &RenderOptions,
) -> Result<Document<M>> {
    log::debug!("Loading {}", path.display());
    let content = read_source(&path).await?;
    Document::parse(path, &content, discovery_index, options)
}

pub(crate) async fn read_source(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Fail on the first identifier that appears twice, naming both files.
///
/// Entries must be in discovery order so the earlier file is reported as
/// the original.
pub(crate) fn check_unique<'a, I>(entries: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a Path)>,
{
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for (identifier, path) in entries {
        if let Some(first) = seen.insert(identifier, path) {
            return Err(Error::validation_in(
                path,
                format!(
                    "duplicate slug '{identifier}' (already used by {})",
                    first.display()
                ),
            ));
        }
    }
    Ok(())
}

/// Stable sort by order; equal orders keep discovery order.
fn sort_documents<M: DocumentMeta>(documents: &mut [Document<M>]) {
    documents.sort_by_key(|d| (d.order(), d.discovery_index));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::meta::ProductMeta;
    use std::fs;
    use tempfile::TempDir;

    fn write_product(dir: &Path, file: &str, slug: &str, order: i64) {
        let content = format!(
            "---\ntitle: {slug}\nslug: {slug}\ntagline: t\nstatus: beta\nstack: []\n\
             order: {order}\nmodelScene: false\n---\n\n# {slug}\n"
        );
        fs::write(dir.join(file), content).unwrap();
    }

    fn products_config(root: &Path) -> CatalogConfig {
        CatalogConfig::new(root).with_category("products", CategoryConfig::new("products"))
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_load_sorts_by_order() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("products");
        fs::create_dir(&dir).unwrap();
        write_product(&dir, "a.mdx", "a", 2);
        write_product(&dir, "b.mdx", "b", 1);

        let repo: ContentRepository<ProductMeta> =
            ContentRepository::load(&products_config(tmp.path()), &RenderOptions::default())
                .await
                .unwrap();

        assert_eq!(repo.identifiers("products"), vec!["b", "a"]);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.categories().collect::<Vec<_>>(), vec!["products"]);
    }

    #[tokio::test]
    async fn test_load_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();

        let repo: ContentRepository<ProductMeta> =
            ContentRepository::load(&products_config(tmp.path()), &RenderOptions::default())
                .await
                .unwrap();

        assert!(repo.list_all("products").is_empty());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_load_category_path_is_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("products"), "not a dir").unwrap();

        let err = ContentRepository::<ProductMeta>::load(
            &products_config(tmp.path()),
            &RenderOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_ignores_other_extensions() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("products");
        fs::create_dir(&dir).unwrap();
        write_product(&dir, "a.mdx", "a", 1);
        fs::write(dir.join("notes.txt"), "---\nnot: content\n").unwrap();

        let docs = load_category::<ProductMeta>(
            "products",
            &CategoryConfig::new("products"),
            tmp.path(),
            &RenderOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(docs.len(), 1);
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_and_unknown() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("products");
        fs::create_dir(&dir).unwrap();
        write_product(&dir, "cowcow.mdx", "cowcow", 1);

        let repo: ContentRepository<ProductMeta> =
            ContentRepository::load(&products_config(tmp.path()), &RenderOptions::default())
                .await
                .unwrap();

        assert_eq!(repo.get("products", "cowcow").unwrap().identifier, "cowcow");
        assert!(repo.get("products", "nonexistent").is_none());
        assert!(repo.get("blog", "cowcow").is_none());
        assert!(repo.list_all("blog").is_empty());
    }

    #[tokio::test]
    async fn test_static_paths_in_memory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("products");
        fs::create_dir(&dir).unwrap();
        write_product(&dir, "x.mdx", "cowcow", 1);

        let repo: ContentRepository<ProductMeta> =
            ContentRepository::load(&products_config(tmp.path()), &RenderOptions::default())
                .await
                .unwrap();

        let paths = repo.static_paths("products");
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].route(), "/products/cowcow");
    }

    // ------------------------------------------------------------------------
    // Validation helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_check_unique_names_both_files() {
        let entries = vec![
            ("cowcow", Path::new("a.mdx")),
            ("other", Path::new("b.mdx")),
            ("cowcow", Path::new("c.mdx")),
        ];
        let err = check_unique(entries).unwrap_err();
        let msg = err.to_string();

        assert!(matches!(err, Error::ContentValidation { .. }));
        assert!(msg.contains("a.mdx"), "{msg}");
        assert!(msg.contains("c.mdx"), "{msg}");
    }

    #[test]
    fn test_from_documents_rejects_duplicates() {
        let opts = RenderOptions::default();
        let make = |file: &str, index| {
            let content = "---\ntitle: X\nslug: same\ntagline: t\nstatus: stable\nstack: []\n\
                           order: 1\nmodelScene: false\n---\n";
            Document::<ProductMeta>::parse(file, content, index, &opts).unwrap()
        };

        let result = ContentRepository::from_documents([(
            "products".to_string(),
            vec![make("a.mdx", 0), make("b.mdx", 1)],
        )]);
        assert!(result.is_err());
    }
}
