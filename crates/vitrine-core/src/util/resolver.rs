//! Configurable path resolver for the config file and content root.
//!
//! `PathResolver` locates the project's config file and content directory
//! using an explicit override, environment variables, and fallback paths.
//!
//! # Example
//!
//! ```no_run
//! use vitrine_core::util::resolver::PathResolver;
//!
//! let resolver = PathResolver::new("vitrine").with_config_file_name("vitrine.toml");
//!
//! // Checks --config, then VITRINE_CONFIG, then vitrine.toml in the working
//! // directory or its ancestors, then the platform config dir.
//! if let Some(config) = resolver.config_file(None) {
//!     println!("Config: {}", config.display());
//! }
//! ```

use std::env;
use std::path::{Path, PathBuf};

use crate::util::paths::{expand_tilde, find_dir_with_marker, resolve_under};

/// Configurable path resolver for a project.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Project name (e.g., "vitrine")
    project_name: String,
    /// Environment variable prefix (e.g., "VITRINE")
    env_prefix: String,
    /// Config file name looked up in the working directory.
    config_file_name: String,
    /// Working directory used for relative lookups.
    working_dir: Option<PathBuf>,
}

impl PathResolver {
    /// Create a new resolver for the given project name.
    ///
    /// The project name is converted to an environment variable prefix:
    /// - "vitrine" → "VITRINE"
    /// - "my-site" → "MY_SITE"
    pub fn new(project_name: &str) -> Self {
        let env_prefix = project_name.to_uppercase().replace(['-', ' '], "_");

        Self {
            project_name: project_name.to_string(),
            env_prefix,
            config_file_name: format!("{project_name}.toml"),
            working_dir: None,
        }
    }

    /// Set the config file name looked up in the working directory.
    pub fn with_config_file_name(mut self, name: &str) -> Self {
        self.config_file_name = name.to_string();
        self
    }

    /// Use `dir` instead of the process working directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Get the environment variable name for a given suffix.
    ///
    /// # Example
    /// ```
    /// use vitrine_core::util::resolver::PathResolver;
    ///
    /// let resolver = PathResolver::new("vitrine");
    /// assert_eq!(resolver.env_var("CONFIG"), "VITRINE_CONFIG");
    /// ```
    pub fn env_var(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    /// Resolve the config file path.
    ///
    /// Checks in order:
    /// 1. The explicit path (e.g. `--config`)
    /// 2. `{PROJECT}_CONFIG` environment variable
    /// 3. `{config_file_name}` in the working directory or an ancestor
    /// 4. `{platform config dir}/{project}/config.toml` (may not exist yet)
    pub fn config_file(&self, explicit: Option<&str>) -> Option<PathBuf> {
        self.config_file_from(explicit, env::var(self.env_var("CONFIG")).ok())
    }

    /// [`config_file`](Self::config_file) with the environment value supplied
    /// by the caller.
    pub fn config_file_from(
        &self,
        explicit: Option<&str>,
        env_value: Option<String>,
    ) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(expand_tilde(path));
        }

        if let Some(path) = env_value.filter(|v| !v.is_empty()) {
            return Some(expand_tilde(&path));
        }

        if let Some(root) = find_dir_with_marker(&self.working_dir(), &self.config_file_name) {
            return Some(root.join(&self.config_file_name));
        }

        self.default_config_file()
    }

    /// The per-user config file location, whether or not it exists.
    pub fn default_config_file(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(&self.project_name).join("config.toml"))
    }

    /// Resolve the content root directory.
    ///
    /// `{PROJECT}_CONTENT_ROOT` wins over the configured value. Relative
    /// paths are resolved against `base` (usually the config file's
    /// directory); `~` is expanded.
    pub fn content_root(&self, configured: &str, base: &Path) -> PathBuf {
        self.content_root_from(configured, base, env::var(self.env_var("CONTENT_ROOT")).ok())
    }

    /// [`content_root`](Self::content_root) with the environment value
    /// supplied by the caller.
    pub fn content_root_from(
        &self,
        configured: &str,
        base: &Path,
        env_value: Option<String>,
    ) -> PathBuf {
        let raw = env_value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| configured.to_string());
        resolve_under(base, expand_tilde(&raw))
    }

    /// Get the project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Get the environment variable prefix.
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    fn working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
