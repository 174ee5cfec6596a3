//! Page head metadata for document pages.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::meta::DocumentMeta;

/// Open Graph tags of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraph {
    /// `og:title`.
    pub title: String,
    /// `og:description`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `og:type`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// `<head>` data for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Document title.
    pub title: String,
    /// Meta description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Open Graph tags; absent on error pages.
    #[serde(rename = "openGraph", skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
}

impl PageMetadata {
    /// Metadata for a document page: `"{title} | {site_name}"`.
    pub fn for_document<M: DocumentMeta>(document: &Document<M>, site_name: &str) -> Self {
        let meta = &document.metadata;
        let description = meta.description().map(str::to_string);

        Self {
            title: format!("{} | {site_name}", meta.title()),
            description: description.clone(),
            open_graph: Some(OpenGraph {
                title: meta.title().to_string(),
                description,
                kind: "website".to_string(),
            }),
        }
    }

    /// Metadata for a missing document of `M`'s kind, e.g. "Product Not Found".
    pub fn not_found<M: DocumentMeta>() -> Self {
        Self::not_found_for(M::KIND)
    }

    /// Metadata for a missing document of an arbitrary kind.
    pub fn not_found_for(kind: &str) -> Self {
        Self {
            title: format!("{kind} Not Found"),
            description: None,
            open_graph: None,
        }
    }
}
