//! Markdown structure parsing utilities.
//!
//! Lightweight event scans over a document body, used for listing cards,
//! page outlines and search snippets where a full render tree is overkill:
//!
//! - [`extract_first_heading`]: first heading of any level
//! - [`extract_headings`]: every heading, in order (page outline)
//! - [`extract_first_paragraph`]: first paragraph, truncated
//! - [`extract_text_content`]: plain text with formatting stripped
//!
//! Math is enabled while scanning so TeX source counts as text rather than
//! being split apart at `_` and `*`.
//!
//! # Example
//!
//! ```rust
//! use vitrine_content::markdown::parser::{extract_first_heading, extract_first_paragraph};
//! use pulldown_cmark::HeadingLevel;
//!
//! let content = "# Deep Ubuntu AI\n\nFoundation models for African languages.\n\n## Features";
//!
//! let (level, title) = extract_first_heading(content).unwrap();
//! assert_eq!(level, HeadingLevel::H1);
//! assert_eq!(title, "Deep Ubuntu AI");
//!
//! let summary = extract_first_paragraph(content, 100).unwrap();
//! assert_eq!(summary, "Foundation models for African languages.");
//! ```

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

fn scan(content: &str) -> Parser<'_> {
    Parser::new_ext(content, Options::ENABLE_MATH | Options::ENABLE_TABLES)
}

/// Extract the first heading from markdown content.
///
/// Inline formatting (bold, italic, links) is stripped from the heading text.
/// Returns `None` if there is no non-empty heading.
///
/// ```rust
/// use vitrine_content::markdown::parser::extract_first_heading;
/// use pulldown_cmark::HeadingLevel;
///
/// let (level, text) = extract_first_heading("Intro\n\n## Quickstart\n").unwrap();
/// assert_eq!(level, HeadingLevel::H2);
/// assert_eq!(text, "Quickstart");
/// ```
pub fn extract_first_heading(content: &str) -> Option<(HeadingLevel, String)> {
    extract_headings_limit(content, 1).into_iter().next()
}

/// Extract every heading, in document order.
///
/// Headings with no text are skipped. Used to build page outlines (the tab
/// strip on a product page is one heading per tab).
///
/// ```rust
/// use vitrine_content::markdown::parser::extract_headings;
///
/// let outline = extract_headings("# A\n\ntext\n\n## B\n\n### C\n");
/// let titles: Vec<_> = outline.iter().map(|(_, t)| t.as_str()).collect();
/// assert_eq!(titles, vec!["A", "B", "C"]);
/// ```
pub fn extract_headings(content: &str) -> Vec<(HeadingLevel, String)> {
    extract_headings_limit(content, usize::MAX)
}

fn extract_headings_limit(content: &str, limit: usize) -> Vec<(HeadingLevel, String)> {
    let mut headings = Vec::new();
    let mut current: Option<(HeadingLevel, String)> = None;

    for event in scan(content) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    let text = normalize_whitespace(&text);
                    if !text.is_empty() {
                        headings.push((level, text));
                        if headings.len() >= limit {
                            break;
                        }
                    }
                }
            }
            Event::Text(text) | Event::Code(text) | Event::InlineMath(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    headings
}

/// Extract the first paragraph from markdown content.
///
/// Skips headings and returns the first paragraph with inline formatting
/// stripped, truncated at a word boundary to at most `max_chars` characters
/// (plus `...`).
///
/// ```rust
/// use vitrine_content::markdown::parser::extract_first_paragraph;
///
/// let content = "# Title\n\nA **fast** CLI for data collection.\n\nMore.";
/// assert_eq!(
///     extract_first_paragraph(content, 50).unwrap(),
///     "A fast CLI for data collection."
/// );
/// ```
pub fn extract_first_paragraph(content: &str, max_chars: usize) -> Option<String> {
    let mut in_heading = false;
    let mut paragraph: Option<String> = None;

    for event in scan(content) {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => in_heading = false,
            Event::Start(Tag::Paragraph) if !in_heading => paragraph = Some(String::new()),
            Event::End(TagEnd::Paragraph) => {
                if let Some(text) = paragraph.take() {
                    let text = normalize_whitespace(&text);
                    if !text.is_empty() {
                        return Some(truncate_text(&text, max_chars));
                    }
                }
            }
            Event::Text(text) | Event::Code(text) | Event::InlineMath(text) => {
                if let Some(buf) = paragraph.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(buf) = paragraph.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract plain text content from markdown, stripping all formatting.
///
/// Code blocks are dropped; inline code and math source are kept. The result
/// is whitespace-normalized, suitable for search indexing or word counts.
///
/// ```rust
/// use vitrine_content::markdown::parser::extract_text_content;
///
/// let text = extract_text_content("# Title\n\nSome **bold** text.\n\n```sh\nrm -rf\n```");
/// assert_eq!(text, "Title Some bold text.");
/// ```
pub fn extract_text_content(content: &str) -> String {
    let mut text_content = String::new();
    let mut in_code_block = false;

    let mut push_word_break = |buf: &mut String| {
        if !buf.is_empty() && !buf.ends_with(' ') {
            buf.push(' ');
        }
    };

    for event in scan(content) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) if !in_code_block => text_content.push_str(&text),
            Event::Code(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                text_content.push_str(&text);
            }
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::TableCell) => push_word_break(&mut text_content),
            _ => {}
        }
    }

    normalize_whitespace(&text_content)
}

/// Truncate to at most `max_chars` characters at a word boundary, adding
/// `...` when anything was cut.
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let head = &text[..cut];
    let head = head
        .rfind(char::is_whitespace)
        .map(|i| &head[..i])
        .unwrap_or(head);

    format!("{}...", head.trim_end())
}

/// Collapse runs of whitespace into single spaces and trim.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Tests
// ============================================================================
