//! A parsed content file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use vitrine_content::{
    HeadingLevel, RenderOptions, Rendered, Severity, extract_first_paragraph, extract_frontmatter,
    extract_headings, render_at,
};
use vitrine_core::{Error, Result, is_url_safe_slug, normalize_id};

use crate::meta::{DocumentMeta, parse_metadata};

/// One document: typed metadata plus its body, raw and rendered.
///
/// Documents are built once while loading a repository and never change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document<M> {
    /// URL-safe identifier (the metadata slug).
    pub identifier: String,
    /// Typed front matter.
    pub metadata: M,
    /// Body text after the front matter block.
    pub raw_body: String,
    /// Render tree and diagnostics for the body.
    pub rendered: Rendered,
    /// File the document was loaded from.
    pub source: PathBuf,
    /// Position of the file in discovery order.
    pub discovery_index: usize,
}

impl<M: DocumentMeta> Document<M> {
    /// Parse a full content file.
    ///
    /// Errors name `source`. Render diagnostics are logged and kept on the
    /// document.
    pub fn parse(
        source: impl Into<PathBuf>,
        content: &str,
        discovery_index: usize,
        options: &RenderOptions,
    ) -> Result<Self> {
        let source = source.into();
        Self::parse_inner(&source, content, discovery_index, options)
            .map_err(|e| e.in_file(&source))
            .map(|(metadata, raw_body, rendered)| Self {
                identifier: metadata.identifier().to_string(),
                metadata,
                raw_body,
                rendered,
                source,
                discovery_index,
            })
    }

    fn parse_inner(
        source: &Path,
        content: &str,
        discovery_index: usize,
        options: &RenderOptions,
    ) -> Result<(M, String, Rendered)> {
        let frontmatter = extract_frontmatter(content)?;
        let metadata: M = parse_metadata(&frontmatter)?;
        check_identifier(metadata.identifier())?;

        let rendered = render_at(frontmatter.body(), options, frontmatter.body_line())?;
        for diagnostic in &rendered.diagnostics {
            match diagnostic.severity {
                Severity::Warning => log::warn!(
                    "{}:{}: {}",
                    source.display(),
                    diagnostic.line,
                    diagnostic.message
                ),
                Severity::Note => log::debug!(
                    "{}:{}: {}",
                    source.display(),
                    diagnostic.line,
                    diagnostic.message
                ),
            }
        }

        log::debug!(
            "Parsed {} '{}' from {} (#{discovery_index})",
            M::KIND,
            metadata.identifier(),
            source.display()
        );

        Ok((metadata, frontmatter.body().to_string(), rendered))
    }

    /// Listing position.
    pub fn order(&self) -> i64 {
        self.metadata.order()
    }

    /// First body paragraph as plain text, for cards and previews.
    pub fn summary(&self, max_chars: usize) -> Option<String> {
        extract_first_paragraph(&self.raw_body, max_chars)
    }

    /// Body headings in order, for tab strips and tables of contents.
    pub fn outline(&self) -> Vec<(HeadingLevel, String)> {
        extract_headings(&self.raw_body)
    }
}

/// Reject identifiers that cannot appear in a URL path segment as-is.
pub(crate) fn check_identifier(identifier: &str) -> Result<()> {
    if is_url_safe_slug(identifier) {
        return Ok(());
    }

    let suggestion = normalize_id(identifier);
    let hint = if is_url_safe_slug(&suggestion) {
        format!("try '{suggestion}'")
    } else {
        "use lowercase letters, digits and single hyphens".to_string()
    };
    Err(Error::validation(format!(
        "slug '{identifier}' is not URL-safe ({hint})"
    )))
}
