//! Front matter extraction, Markdown render trees, and content utilities.
//!
//! This crate provides generic content processing used by every Vitrine
//! category. It has no domain-specific logic: each category defines its own
//! metadata type and uses these utilities for parsing.
//!
//! # Modules
//!
//! - [`markdown`]: Markdown parsing and front matter extraction
//!   - [`markdown::frontmatter`]: YAML front matter extraction
//!   - [`markdown::render`]: Body markup → render tree
//!   - [`markdown::parser`]: Heading, paragraph, text extraction
//!
//! # Example
//!
//! ```rust
//! use vitrine_content::markdown::{extract_frontmatter, render_at, RenderOptions};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct MyMeta {
//!     title: String,
//! }
//!
//! let content = "---\ntitle: Hello\n---\n\nEnergy is $E = mc^2$.";
//! let fm = extract_frontmatter(content).unwrap();
//! let meta: Option<MyMeta> = fm.deserialize().unwrap();
//! assert_eq!(meta.unwrap().title, "Hello");
//!
//! let rendered = render_at(fm.body(), &RenderOptions::default(), fm.body_line()).unwrap();
//! assert!(rendered.diagnostics.is_empty());
//! ```

#![doc = include_str!("../README.md")]

pub mod markdown;

// Re-export commonly used types
pub use markdown::{
    Alignment, Diagnostic, FieldValue, FrontmatterResult, Node, RenderOptions, RenderTree,
    Rendered, Severity, Tag, extract_first_heading, extract_first_paragraph, extract_frontmatter,
    extract_headings, extract_text_content, render, render_at, strip_frontmatter,
};

// Re-export HeadingLevel for convenience
pub use pulldown_cmark::HeadingLevel;
