//! Site configuration (`vitrine.toml`).
//!
//! ```toml
//! site_name = "Deep Ubuntu Research"
//! content_root = "content"
//!
//! [render]
//! math = true
//!
//! [categories.products]
//! dir = "products"
//! extensions = ["mdx", "md"]
//! ```
//!
//! Every key is optional. A missing file means defaults: one `products`
//! category under `./content`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vitrine_catalog::{CatalogConfig, CategoryConfig};
use vitrine_content::RenderOptions;
use vitrine_core::{Error, PathResolver, Result};

/// Project name used for env vars (`VITRINE_*`) and config paths.
pub const PROJECT_NAME: &str = "vitrine";

/// Config file looked up in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = "vitrine.toml";

/// Site-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Appended to page titles: `"{title} | {site_name}"`.
    pub site_name: String,

    /// Content root; relative to the config file's directory.
    pub content_root: String,

    /// Markdown extensions applied to every body.
    pub render: RenderOptions,

    /// Category name → directory under the content root.
    pub categories: BTreeMap<String, CategoryConfig>,

    /// File this configuration was read from.
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert("products".to_string(), CategoryConfig::new("products"));

        Self {
            site_name: "Deep Ubuntu Research".to_string(),
            content_root: "content".to_string(),
            render: RenderOptions::default(),
            categories,
            source: None,
        }
    }
}

impl SiteConfig {
    /// Resolver for config and content paths.
    pub fn resolver() -> PathResolver {
        PathResolver::new(PROJECT_NAME).with_config_file_name(CONFIG_FILE_NAME)
    }

    /// Resolve the config file path (`--config`, `VITRINE_CONFIG`,
    /// `vitrine.toml` upwards from the working directory, user config dir).
    pub fn resolve_path(explicit: Option<&str>) -> Option<PathBuf> {
        Self::resolver().config_file(explicit)
    }

    /// Per-user config file location.
    pub fn default_path() -> Option<PathBuf> {
        Self::resolver().default_config_file()
    }

    /// Load the resolved configuration.
    ///
    /// A resolved path that does not exist yields defaults, unless it was
    /// given explicitly.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_path(explicit) {
            Some(path) if path.is_file() => Self::load_file(&path),
            Some(path) if explicit.is_some() => Err(Error::config(format!(
                "Config file not found: {}",
                path.display()
            ))),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let mut config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        config.source = Some(path.to_path_buf());

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// File this configuration came from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Directory relative paths resolve against: the config file's directory,
    /// or the working directory for defaults.
    pub fn base_dir(&self) -> PathBuf {
        self.source
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Content root after `VITRINE_CONTENT_ROOT`, `~` expansion and
    /// relative resolution.
    pub fn content_root_path(&self) -> PathBuf {
        Self::resolver().content_root(&self.content_root, &self.base_dir())
    }

    /// Catalog configuration for the repository.
    pub fn catalog(&self) -> CatalogConfig {
        self.catalog_at(self.content_root_path())
    }

    /// Catalog configuration with an explicit content root.
    pub fn catalog_at(&self, root: PathBuf) -> CatalogConfig {
        CatalogConfig {
            root,
            categories: self.categories.clone(),
        }
    }

    /// Look up a category.
    pub fn category(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.get(name)
    }
}
