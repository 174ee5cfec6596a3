//! Common fixtures for catalog integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use vitrine_catalog::{CatalogConfig, CategoryConfig, ContentRepository, ProductMeta};
use vitrine_content::RenderOptions;

/// A temporary content root with a `products` category.
pub struct Fixture {
    /// Keeps the directory alive for the test's duration.
    pub tmp: TempDir,
}

impl Fixture {
    /// Empty content root. The `products` directory is not created.
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
        }
    }

    /// Content root path.
    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// The `products` directory, created on demand.
    pub fn products_dir(&self) -> PathBuf {
        let dir = self.root().join("products");
        fs::create_dir_all(&dir).expect("create products dir");
        dir
    }

    /// Catalog config with the single `products` category.
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig::new(self.root()).with_category("products", Self::category())
    }

    /// The `products` category config.
    pub fn category() -> CategoryConfig {
        CategoryConfig::new("products")
    }

    /// Write a raw file into `products/`.
    pub fn write_raw(&self, file: &str, content: &str) -> PathBuf {
        let path = self.products_dir().join(file);
        fs::write(&path, content).expect("write fixture");
        path
    }

    /// Write a valid product file.
    pub fn write_product(&self, file: &str, slug: &str, order: i64) -> PathBuf {
        self.write_raw(file, &product(slug, order, "beta", "\n# Overview\n\nBody.\n"))
    }

    /// Load the repository.
    pub async fn load(&self) -> vitrine_core::Result<ContentRepository<ProductMeta>> {
        ContentRepository::load(&self.config(), &RenderOptions::default()).await
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Product file content with the given slug, order, status and body.
pub fn product(slug: &str, order: i64, status: &str, body: &str) -> String {
    format!(
        "---\n\
         title: Product {slug}\n\
         slug: {slug}\n\
         tagline: Tagline for {slug}\n\
         status: {status}\n\
         stack: [Rust, TypeScript]\n\
         order: {order}\n\
         modelScene: false\n\
         ---\n\
         {body}"
    )
}
