//! Body markup → render tree.
//!
//! The body of a content file is CommonMark with a few extensions (math,
//! tables, footnotes, strikethrough, task lists). [`render`] turns it into a
//! [`RenderTree`]: a plain, serializable tree that the presentation layer
//! walks to produce HTML or components. Nothing here emits HTML.
//!
//! Rendering is deterministic: the same body and [`RenderOptions`] always
//! produce equal trees.
//!
//! # Math
//!
//! With [`RenderOptions::math`] enabled, `$...$` is inline math and
//! `$$...$$` is display math. A display block that is opened but not closed
//! before a blank line (or the end of input) is a parse error.
//!
//! # Pass-through
//!
//! Constructs the parser does not understand, including MDX component tags
//! such as `<ModelScene />`, are kept as [`Node::Html`] with their literal
//! source. Component tags also produce a warning [`Diagnostic`].
//!
//! # Example
//!
//! ```rust
//! use vitrine_content::markdown::render::{render, Node, RenderOptions};
//!
//! let rendered = render("Loss is $L = -\\log p$.", &RenderOptions::default()).unwrap();
//! let math: Vec<_> = rendered
//!     .tree
//!     .descendants()
//!     .filter(|node| matches!(node, Node::Math { .. }))
//!     .collect();
//! assert_eq!(math.len(), 1);
//! ```

use std::ops::Range;
use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, TagEnd};
use regex::Regex;
use serde::{Deserialize, Serialize};
use vitrine_core::{Error, Result};

#[allow(clippy::expect_used)]
static COMPONENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Z][A-Za-z0-9_.]*)").expect("Invalid component tag regex"));

// ============================================================================
// Options
// ============================================================================

/// Markup extensions enabled while parsing a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Inline `$..$` and display `$$..$$` math.
    pub math: bool,
    /// GitHub-style tables.
    pub tables: bool,
    /// Footnote references and definitions.
    pub footnotes: bool,
    /// `~~strikethrough~~`.
    pub strikethrough: bool,
    /// `- [x]` task list markers.
    pub tasklists: bool,
    /// `# Heading {#id .class}` attributes.
    pub heading_attributes: bool,
    /// Curly quotes, dashes and ellipses.
    pub smart_punctuation: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            math: true,
            tables: true,
            footnotes: true,
            strikethrough: true,
            tasklists: true,
            heading_attributes: true,
            smart_punctuation: false,
        }
    }
}

impl RenderOptions {
    /// Every extension enabled.
    pub fn all() -> Self {
        Self {
            smart_punctuation: true,
            ..Self::default()
        }
    }

    /// Plain CommonMark, no extensions.
    pub fn commonmark() -> Self {
        Self {
            math: false,
            tables: false,
            footnotes: false,
            strikethrough: false,
            tasklists: false,
            heading_attributes: false,
            smart_punctuation: false,
        }
    }

    fn to_parser_options(&self) -> Options {
        let mut options = Options::empty();
        let flags = [
            (self.math, Options::ENABLE_MATH),
            (self.tables, Options::ENABLE_TABLES),
            (self.footnotes, Options::ENABLE_FOOTNOTES),
            (self.strikethrough, Options::ENABLE_STRIKETHROUGH),
            (self.tasklists, Options::ENABLE_TASKLISTS),
            (self.heading_attributes, Options::ENABLE_HEADING_ATTRIBUTES),
            (self.smart_punctuation, Options::ENABLE_SMART_PUNCTUATION),
        ];
        for (enabled, flag) in flags {
            if enabled {
                options.insert(flag);
            }
        }
        options
    }
}

// ============================================================================
// Tree types
// ============================================================================

/// Column alignment in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// No explicit alignment.
    None,
    /// `:--`
    Left,
    /// `:-:`
    Center,
    /// `--:`
    Right,
}

/// The kind of a container element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Tag {
    /// Paragraph.
    Paragraph,
    /// Heading with level 1–6 and optional `{#id .class}` attributes.
    Heading {
        /// Heading level, 1–6.
        level: u8,
        /// Explicit anchor id.
        id: Option<String>,
        /// Extra classes.
        classes: Vec<String>,
    },
    /// Block quote.
    BlockQuote,
    /// Fenced or indented code block.
    CodeBlock {
        /// First word of the fence info string.
        language: Option<String>,
    },
    /// Raw HTML block; children are [`Node::Html`].
    HtmlBlock,
    /// Ordered list (with start number) or bullet list.
    List {
        /// Start number for ordered lists.
        start: Option<u64>,
    },
    /// List item.
    Item,
    /// Footnote definition.
    FootnoteDefinition {
        /// Footnote label.
        label: String,
    },
    /// Table.
    Table {
        /// Per-column alignment.
        alignments: Vec<Alignment>,
    },
    /// Table header row container.
    TableHead,
    /// Table row.
    TableRow,
    /// Table cell.
    TableCell,
    /// `*emphasis*`.
    Emphasis,
    /// `**strong**`.
    Strong,
    /// `~~strikethrough~~`.
    Strikethrough,
    /// Hyperlink.
    Link {
        /// Destination URL.
        href: String,
        /// Title attribute (may be empty).
        title: String,
    },
    /// Image; children hold the alt text.
    Image {
        /// Image URL.
        src: String,
        /// Title attribute (may be empty).
        title: String,
    },
    /// Any other container; rendered as its children.
    Span,
}

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Container with children.
    Element {
        /// What kind of container.
        tag: Tag,
        /// Child nodes in source order.
        children: Vec<Node>,
    },
    /// Literal text.
    Text {
        /// The text.
        value: String,
    },
    /// Inline code span.
    Code {
        /// Code contents.
        value: String,
    },
    /// Math expression, inline or display.
    Math {
        /// `true` for `$$..$$`.
        display: bool,
        /// TeX source between the delimiters.
        value: String,
    },
    /// Raw HTML or unrecognized markup, passed through verbatim.
    Html {
        /// Literal source.
        value: String,
    },
    /// Reference to a footnote definition.
    FootnoteReference {
        /// Footnote label.
        label: String,
    },
    /// Task list checkbox.
    TaskMarker {
        /// Whether the box is ticked.
        checked: bool,
    },
    /// Line break inside a paragraph without trailing spaces.
    SoftBreak,
    /// Hard line break.
    HardBreak,
    /// Thematic break.
    Rule,
}

impl Node {
    fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }
}

/// A parsed body, ready for the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTree {
    /// Top-level block nodes.
    pub children: Vec<Node>,
}

impl RenderTree {
    /// `true` if the body produced no nodes.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Every node in the tree, depth-first in source order.
    pub fn descendants(&self) -> impl Iterator<Item = &Node> {
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().iter().rev());
            Some(node)
        })
    }

    /// Concatenated text, code and math content of the tree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in self.descendants() {
            match node {
                Node::Text { value } | Node::Code { value } | Node::Math { value, .. } => {
                    out.push_str(value);
                }
                Node::SoftBreak | Node::HardBreak => out.push(' '),
                _ => {}
            }
        }
        out
    }
}

/// How serious a [`Diagnostic`] is. Diagnostics never fail a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Worth an author's attention.
    Warning,
    /// Informational.
    Note,
}

/// A non-fatal finding produced while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// 1-based line in the source file.
    pub line: usize,
    /// Human-readable message.
    pub message: String,
}

/// Output of [`render`]: the tree plus any diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    /// The render tree.
    pub tree: RenderTree,
    /// Non-fatal findings, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

// ============================================================================
// Rendering
// ============================================================================

/// Parse body markup into a render tree. Lines are reported from 1.
pub fn render(body: &str, options: &RenderOptions) -> Result<Rendered> {
    render_at(body, options, 1)
}

/// Parse body markup that starts at `first_line` of its source file.
///
/// Error and diagnostic lines are offset so they point into the file, not the
/// body.
///
/// # Errors
///
/// `Error::ContentParse` when math is enabled and a `$$` display block is not
/// closed.
pub fn render_at(body: &str, options: &RenderOptions, first_line: usize) -> Result<Rendered> {
    let to_file_line = |body_line: usize| body_line + first_line.saturating_sub(1);

    let lines = LineIndex::new(body);
    let mut builder = TreeBuilder::default();
    let mut scan = DelimiterScan::default();

    for (event, range) in Parser::new_ext(body, options.to_parser_options()).into_offset_iter() {
        if options.math {
            scan.observe(body, &event, &range);
        }
        builder.line = to_file_line(lines.line_of(range.start));
        builder.push(event);
    }

    if let Some(offset) = scan.finish(body) {
        return Err(Error::parse_at(
            to_file_line(lines.line_of(offset)),
            "unterminated display math: '$$' is never closed",
        ));
    }

    Ok(builder.finish())
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    stack: Vec<(Tag, Vec<Node>)>,
    diagnostics: Vec<Diagnostic>,
    line: usize,
}

impl TreeBuilder {
    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.stack.push((convert_tag(tag), Vec::new())),
            Event::End(_) => {
                if let Some((tag, children)) = self.stack.pop() {
                    self.append(Node::Element { tag, children });
                }
            }
            Event::Text(text) => self.append_text(&text),
            Event::Code(code) => self.append(Node::Code {
                value: code.into_string(),
            }),
            Event::InlineMath(math) => self.append_math(false, math.into_string()),
            Event::DisplayMath(math) => self.append_math(true, math.into_string()),
            Event::Html(html) | Event::InlineHtml(html) => self.append_html(&html),
            Event::FootnoteReference(label) => self.append(Node::FootnoteReference {
                label: label.into_string(),
            }),
            Event::SoftBreak => self.append(Node::SoftBreak),
            Event::HardBreak => self.append(Node::HardBreak),
            Event::Rule => self.append(Node::Rule),
            Event::TaskListMarker(checked) => self.append(Node::TaskMarker { checked }),
        }
    }

    fn current(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some((_, children)) => children,
            None => &mut self.root,
        }
    }

    fn append(&mut self, node: Node) {
        self.current().push(node);
    }

    // The parser splits text at special characters; adjacent runs are merged.
    fn append_text(&mut self, text: &str) {
        if let Some(Node::Text { value }) = self.current().last_mut() {
            value.push_str(text);
        } else {
            self.append(Node::Text {
                value: text.to_string(),
            });
        }
    }

    fn append_html(&mut self, html: &str) {
        for caps in COMPONENT_TAG.captures_iter(html) {
            let name = &caps[1];
            self.warn(format!(
                "component <{name}> is not rendered here; passed through as raw markup"
            ));
        }
        if let Some(Node::Html { value }) = self.current().last_mut() {
            value.push_str(html);
        } else {
            self.append(Node::Html {
                value: html.to_string(),
            });
        }
    }

    fn append_math(&mut self, display: bool, value: String) {
        if value.trim().is_empty() {
            self.warn("empty math expression".to_string());
        }
        self.append(Node::Math { display, value });
    }

    fn warn(&mut self, message: String) {
        log::debug!("Render warning at line {}: {message}", self.line);
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            line: self.line,
            message,
        });
    }

    fn finish(mut self) -> Rendered {
        // Unbalanced events do not happen with pulldown-cmark, but never lose content
        while let Some((tag, children)) = self.stack.pop() {
            self.append(Node::Element { tag, children });
        }
        Rendered {
            tree: RenderTree {
                children: self.root,
            },
            diagnostics: self.diagnostics,
        }
    }
}

fn convert_tag(tag: pulldown_cmark::Tag<'_>) -> Tag {
    use pulldown_cmark::Tag as P;

    match tag {
        P::Paragraph => Tag::Paragraph,
        P::Heading {
            level, id, classes, ..
        } => Tag::Heading {
            level: level as u8,
            id: id.map(|id| id.into_string()),
            classes: classes.into_iter().map(|c| c.into_string()).collect(),
        },
        P::BlockQuote(_) => Tag::BlockQuote,
        P::CodeBlock(CodeBlockKind::Fenced(info)) => Tag::CodeBlock {
            language: info
                .split_whitespace()
                .next()
                .map(|lang| lang.to_string()),
        },
        P::CodeBlock(CodeBlockKind::Indented) => Tag::CodeBlock { language: None },
        P::HtmlBlock => Tag::HtmlBlock,
        P::List(start) => Tag::List { start },
        P::Item => Tag::Item,
        P::FootnoteDefinition(label) => Tag::FootnoteDefinition {
            label: label.into_string(),
        },
        P::Table(alignments) => Tag::Table {
            alignments: alignments.into_iter().map(convert_alignment).collect(),
        },
        P::TableHead => Tag::TableHead,
        P::TableRow => Tag::TableRow,
        P::TableCell => Tag::TableCell,
        P::Emphasis => Tag::Emphasis,
        P::Strong => Tag::Strong,
        P::Strikethrough => Tag::Strikethrough,
        P::Link {
            dest_url, title, ..
        } => Tag::Link {
            href: dest_url.into_string(),
            title: title.into_string(),
        },
        P::Image {
            dest_url, title, ..
        } => Tag::Image {
            src: dest_url.into_string(),
            title: title.into_string(),
        },
        _ => Tag::Span,
    }
}

fn convert_alignment(alignment: pulldown_cmark::Alignment) -> Alignment {
    match alignment {
        pulldown_cmark::Alignment::None => Alignment::None,
        pulldown_cmark::Alignment::Left => Alignment::Left,
        pulldown_cmark::Alignment::Center => Alignment::Center,
        pulldown_cmark::Alignment::Right => Alignment::Right,
    }
}

// ============================================================================
// Source positions
// ============================================================================

/// Maps byte offsets in a body to 1-based line numbers.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(index) => index + 1,
            Err(index) => index,
        }
    }
}

/// Finds `$$` delimiters the parser left as literal text.
///
/// A matched `$$..$$` pair becomes a math event, so a `$$` still present in
/// the source of a text run was never closed. Code blocks and code spans are
/// decided by the parser; backslash-escaped dollars are skipped.
#[derive(Default)]
struct DelimiterScan {
    in_code_block: bool,
    run: Option<Range<usize>>,
    unclosed: Option<usize>,
}

impl DelimiterScan {
    fn observe(&mut self, body: &str, event: &Event<'_>, range: &Range<usize>) {
        match event {
            Event::Start(pulldown_cmark::Tag::CodeBlock(_)) => self.in_code_block = true,
            Event::End(TagEnd::CodeBlock) => self.in_code_block = false,
            Event::Text(_) if !self.in_code_block => {
                // Text split at special characters is contiguous in the source
                if let Some(run) = self.run.as_mut().filter(|run| run.end == range.start) {
                    run.end = range.end;
                    return;
                }
                self.flush(body);
                self.run = Some(range.clone());
                return;
            }
            _ => {}
        }
        self.flush(body);
    }

    fn flush(&mut self, body: &str) {
        let Some(run) = self.run.take() else {
            return;
        };
        if self.unclosed.is_some() {
            return;
        }
        self.unclosed = body
            .get(run.clone())
            .into_iter()
            .flat_map(|text| text.match_indices("$$"))
            .map(|(index, _)| run.start + index)
            .find(|&offset| offset == 0 || body.as_bytes().get(offset - 1) != Some(&b'\\'));
    }

    /// Byte offset of the first unclosed `$$`.
    fn finish(mut self, body: &str) -> Option<usize> {
        self.flush(body);
        self.unclosed
    }
}

// ============================================================================
// Tests
// ============================================================================
