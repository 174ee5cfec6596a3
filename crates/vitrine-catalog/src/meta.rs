//! Typed document metadata.
//!
//! Each category has its own metadata schema, deserialized from front matter
//! with serde. Unknown fields are ignored; missing or mistyped fields fail the
//! load with `Error::ContentValidation`.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vitrine_content::FrontmatterResult;
use vitrine_core::{Error, Result};

/// Metadata schema for one category of documents.
///
/// Implementors are plain serde structs; the repository only needs the
/// identifier (for lookup and routing) and the order (for listing).
pub trait DocumentMeta: DeserializeOwned + Send + Sync {
    /// Singular display name of the document kind, e.g. `"Product"`.
    const KIND: &'static str;

    /// URL-safe identifier, unique within the category.
    fn identifier(&self) -> &str;

    /// Listing position. Lower sorts first; ties keep discovery order.
    fn order(&self) -> i64;

    /// Display title.
    fn title(&self) -> &str;

    /// One-line description for page heads and cards.
    fn description(&self) -> Option<&str> {
        None
    }
}

/// Deserialize front matter into `M`.
///
/// A file without a front matter block has no identifier and is rejected.
pub fn parse_metadata<M: DocumentMeta>(frontmatter: &FrontmatterResult<'_>) -> Result<M> {
    frontmatter
        .deserialize::<M>()?
        .ok_or_else(|| Error::validation("missing front matter block"))
}

/// Release status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Early, unstable.
    Alpha,
    /// Feature complete, still settling.
    Beta,
    /// Generally available.
    Stable,
}

impl Status {
    /// All statuses, in release order.
    pub const ALL: [Status; 3] = [Status::Alpha, Status::Beta, Status::Stable];

    /// Front matter spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Alpha => "alpha",
            Status::Beta => "beta",
            Status::Stable => "stable",
        }
    }

    /// Upper-case badge text shown next to the product name.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Alpha => "ALPHA",
            Status::Beta => "BETA",
            Status::Stable => "STABLE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                Error::validation(format!(
                    "unknown status '{s}', expected one of alpha, beta, stable"
                ))
            })
    }
}

/// Front matter of a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMeta {
    /// Product name.
    pub title: String,
    /// URL identifier.
    pub slug: String,
    /// One-line pitch.
    pub tagline: String,
    /// Release status.
    pub status: Status,
    /// Technologies the product is built with.
    pub stack: Vec<String>,
    /// Listing position.
    pub order: i64,
    /// Whether the product page shows a 3D model scene.
    #[serde(rename = "modelScene")]
    pub model_scene: bool,
}

impl DocumentMeta for ProductMeta {
    const KIND: &'static str = "Product";

    fn identifier(&self) -> &str {
        &self.slug
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        Some(&self.tagline)
    }
}

// ============================================================================
// Tests
// ============================================================================
