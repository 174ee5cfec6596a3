//! Markdown parsing and front matter extraction utilities.
//!
//! - [`frontmatter`]: YAML front matter extraction
//! - [`render`]: Body markup → serializable render tree
//! - [`parser`]: Markdown structure parsing (headings, paragraphs)
//!
//! The pipeline for one file is `extract_frontmatter` → `render_at` on the
//! body, passing [`FrontmatterResult::body_line`] so that errors in the body
//! report lines of the original file.

pub mod frontmatter;
pub mod parser;
pub mod render;

// Re-export key types and functions
pub use frontmatter::{FieldValue, FrontmatterResult, extract_frontmatter, strip_frontmatter};
pub use parser::{
    extract_first_heading, extract_first_paragraph, extract_headings, extract_text_content,
};
pub use render::{
    Alignment, Diagnostic, Node, RenderOptions, RenderTree, Rendered, Severity, Tag, render,
    render_at,
};
