//! Error types for vitrine-cli

use thiserror::Error;

/// Result type alias for vitrine-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vitrine-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the content pipeline or configuration
    #[error(transparent)]
    Core(#[from] vitrine_core::Error),

    /// A lookup by identifier found nothing.
    #[error("{kind} Not Found: no '{id}' in category '{category}'")]
    NotFound {
        /// Document kind, e.g. "Product".
        kind: &'static str,
        /// Category searched.
        category: String,
        /// Identifier requested.
        id: String,
    },

    /// The category is not in the site configuration.
    #[error("Unknown category '{name}' (configured: {configured})")]
    UnknownCategory {
        /// Requested category.
        name: String,
        /// Comma-separated configured categories.
        configured: String,
    },

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Core(e.into())
    }
}
