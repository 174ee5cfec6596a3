//! YAML front matter extraction from content files.
//!
//! Front matter is metadata at the start of a file, delimited by `---` lines:
//!
//! ```markdown
//! ---
//! title: Deep Ubuntu AI
//! slug: deep-ubuntu-ai
//! status: beta
//! stack:
//!   - PyTorch
//!   - Rust
//! ---
//!
//! # Overview
//! ```
//!
//! A file that does not start with `---` has no front matter: the metadata is
//! empty and the whole file is body. A file that opens the block but never
//! closes it is malformed.
//!
//! Values follow a minimal schema: strings, booleans, numbers, null, and
//! sequences of scalars. Nested mappings are rejected.
//!
//! # Usage
//!
//! ```rust
//! use vitrine_content::markdown::extract_frontmatter;
//!
//! let content = "---\ntitle: Test\n---\n\nBody";
//! let result = extract_frontmatter(content).unwrap();
//!
//! assert!(result.has_frontmatter());
//! assert_eq!(result.get_str("title"), Some("Test"));
//! assert_eq!(result.body().trim(), "Body");
//! assert_eq!(result.body_line(), 4);
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use vitrine_core::{Error, Result};

const DELIMITER: &str = "---";

#[allow(clippy::expect_used)]
static YAML_CONTEXT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"while parsing [^,]*? at line (\d+)").expect("Invalid YAML context regex")
});

#[allow(clippy::expect_used)]
static YAML_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" at (?:line \d+ column \d+|position \d+)").expect("Invalid YAML position regex")
});

/// A front matter value under the minimal schema.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit `null` or `~`, or a key with no value.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// Integer number.
    Integer(i64),
    /// Non-integer number.
    Float(f64),
    /// String scalar.
    String(String),
    /// Sequence of scalars, each in its string form.
    List(Vec<String>),
}

impl FieldValue {
    fn from_yaml(key: &str, value: &Value) -> std::result::Result<Self, String> {
        match value {
            Value::Null => Ok(FieldValue::Null),
            Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            Value::Number(n) => Ok(n
                .as_i64()
                .map(FieldValue::Integer)
                .unwrap_or_else(|| FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)))),
            Value::String(s) => Ok(FieldValue::String(s.clone())),
            Value::Sequence(items) => items
                .iter()
                .map(|item| {
                    scalar_to_string(item)
                        .ok_or_else(|| format!("'{key}' must be a list of plain values"))
                })
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(FieldValue::List),
            Value::Mapping(_) => Err(format!("'{key}' has a nested mapping, which is not supported")),
            Value::Tagged(_) => Err(format!("'{key}' uses a YAML tag, which is not supported")),
        }
    }

    /// Borrow the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Result of front matter extraction.
///
/// Contains the parsed YAML value (if present), its fields under the minimal
/// schema, and the body content after the front matter.
#[derive(Debug, Clone)]
pub struct FrontmatterResult<'a> {
    /// Parsed YAML mapping, if a front matter block was present.
    value: Option<Value>,
    /// Top-level fields of the block.
    fields: BTreeMap<String, FieldValue>,
    /// Body content after the closing delimiter.
    body: &'a str,
    /// 1-based file line where the body starts.
    body_line: usize,
}

impl<'a> FrontmatterResult<'a> {
    fn without_frontmatter(body: &'a str) -> Self {
        Self {
            value: None,
            fields: BTreeMap::new(),
            body,
            body_line: 1,
        }
    }

    /// Check if a front matter block was found.
    pub fn has_frontmatter(&self) -> bool {
        self.value.is_some()
    }

    /// Get the raw YAML value, if present.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Top-level fields, keyed by name.
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Get a field by name.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get the body content (everything after front matter).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// The 1-based line of the source file on which the body starts.
    pub fn body_line(&self) -> usize {
        self.body_line
    }

    /// Deserialize the front matter into a specific type.
    ///
    /// Returns `None` if no front matter was found, and
    /// `Err(Error::ContentValidation)` if the fields do not fit `T`
    /// (missing field, wrong type, unknown enum value).
    ///
    /// # Example
    ///
    /// ```rust
    /// use vitrine_content::markdown::extract_frontmatter;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct MyMeta {
    ///     title: String,
    /// }
    ///
    /// let content = "---\ntitle: Hello\n---\n\nBody";
    /// let result = extract_frontmatter(content).unwrap();
    /// let meta: Option<MyMeta> = result.deserialize().unwrap();
    /// assert_eq!(meta.unwrap().title, "Hello");
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.value {
            Some(value) => {
                let parsed: T = serde_yaml::from_value(value.clone())
                    .map_err(|e| Error::validation(format!("Invalid front matter: {e}")))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Get a string field from the front matter.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key)?.as_str()
    }

    /// Get a string list field from the front matter.
    ///
    /// Returns an empty vec if the field is missing or not a sequence.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(FieldValue::List(items)) => items.clone(),
            _ => Vec::new(),
        }
    }
}

/// Extract YAML front matter from file content.
///
/// # Behavior
///
/// - No opening `---` line: empty metadata, the whole content is body
/// - Opening `---` without a closing `---` line: `ContentParse` at line 1
/// - Invalid YAML or values outside the minimal schema: `ContentParse` with
///   the file line of the problem
/// - Otherwise: parsed fields and the body after the closing line
///
/// A leading byte order mark is ignored. Lines may end in `\n` or `\r\n`.
///
/// # Example
///
/// ```rust
/// use vitrine_content::markdown::extract_frontmatter;
///
/// let result = extract_frontmatter("# Just Markdown").unwrap();
/// assert!(!result.has_frontmatter());
/// assert_eq!(result.body(), "# Just Markdown");
///
/// let err = extract_frontmatter("---\ntitle: Never closed\n").unwrap_err();
/// assert_eq!(err.line(), Some(1));
/// ```
pub fn extract_frontmatter(content: &str) -> Result<FrontmatterResult<'_>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok(FrontmatterResult::without_frontmatter(content));
    };
    if !is_delimiter(first) {
        return Ok(FrontmatterResult::without_frontmatter(content));
    }

    // Find the closing delimiter line
    let yaml_start = first.len();
    let mut offset = yaml_start;
    let mut closing = None;
    for (index, line) in lines.enumerate() {
        if is_delimiter(line) {
            // Opening delimiter is line 1, the first YAML line is line 2
            closing = Some((offset, offset + line.len(), index + 2));
            break;
        }
        offset += line.len();
    }

    let Some((yaml_end, body_start, closing_line)) = closing else {
        return Err(Error::parse_at(
            1,
            "front matter opened with '---' but never closed",
        ));
    };

    let yaml = &content[yaml_start..yaml_end];
    let body = &content[body_start..];
    let (value, fields) = parse_block(yaml)?;

    log::trace!("Front matter with {} field(s)", fields.len());

    Ok(FrontmatterResult {
        value: Some(value),
        fields,
        body,
        body_line: closing_line + 1,
    })
}

/// Strip front matter from content, returning only the body.
///
/// Malformed front matter is left in place.
///
/// # Example
///
/// ```rust
/// use vitrine_content::markdown::strip_frontmatter;
///
/// let content = "---\ntitle: Test\n---\n\n# Heading";
/// assert_eq!(strip_frontmatter(content).trim(), "# Heading");
/// ```
pub fn strip_frontmatter(content: &str) -> &str {
    extract_frontmatter(content)
        .map(|r| r.body())
        .unwrap_or(content)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Parse the YAML between the delimiters into a mapping and its fields.
fn parse_block(yaml: &str) -> Result<(Value, BTreeMap<String, FieldValue>)> {
    // Lines inside the block start at file line 2
    const FIRST_LINE: usize = 2;

    if yaml.trim().is_empty() {
        return Ok((Value::Mapping(Default::default()), BTreeMap::new()));
    }

    let value: Value = serde_yaml::from_str(yaml).map_err(|e| {
        let line = yaml_error_line(yaml, &e) + FIRST_LINE - 1;
        Error::parse_at(
            line,
            format!("invalid front matter YAML: {}", strip_positions(&e.to_string())),
        )
    })?;

    let mapping = match &value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok((Value::Mapping(Default::default()), BTreeMap::new())),
        _ => {
            return Err(Error::parse_at(
                FIRST_LINE,
                "front matter must be a mapping of keys to values",
            ));
        }
    };

    let mut fields = BTreeMap::new();
    for (key, field) in mapping {
        let Some(key) = key.as_str() else {
            return Err(Error::parse_at(
                key_line(yaml, key).unwrap_or(FIRST_LINE),
                "front matter keys must be strings",
            ));
        };
        let parsed = FieldValue::from_yaml(key, field).map_err(|message| {
            let line = key_line(yaml, &Value::String(key.to_string())).unwrap_or(FIRST_LINE);
            Error::parse_at(line, message)
        })?;
        fields.insert(key.to_string(), parsed);
    }

    Ok((value, fields))
}

/// Block line of a YAML error.
///
/// Problems found only at the end of input (an unclosed flow sequence, say)
/// are reported where the construct was opened.
fn yaml_error_line(yaml: &str, error: &serde_yaml::Error) -> usize {
    let last_line = yaml.lines().count().max(1);
    let problem = error.location().map(|loc| loc.line());
    let context = YAML_CONTEXT_LINE
        .captures(&error.to_string())
        .and_then(|caps| caps[1].parse::<usize>().ok());

    match (problem, context) {
        (Some(line), _) if (1..=last_line).contains(&line) => line,
        (_, Some(line)) => line.clamp(1, last_line),
        _ => last_line,
    }
}

/// Drop serde_yaml's block-relative positions from a message.
fn strip_positions(message: &str) -> String {
    YAML_POSITION.replace_all(message, "").into_owned()
}

/// Best-effort file line of a top-level key.
fn key_line(yaml: &str, key: &Value) -> Option<usize> {
    let key = scalar_to_string(key)?;
    yaml.lines()
        .position(|line| {
            line.strip_prefix(key.as_str())
                .is_some_and(|rest| rest.trim_start().starts_with(':'))
        })
        .map(|index| index + 2)
}

// ============================================================================
// Tests
// ============================================================================
