//! Error types for the Vitrine content pipeline.
//!
//! Content errors come in two flavours:
//!
//! - [`Error::ContentParse`]: the file could not be read as front matter plus
//!   markup (unterminated delimiters, invalid YAML, unterminated math).
//! - [`Error::ContentValidation`]: the file parsed but its content is wrong
//!   (duplicate slug, unknown status, missing or mistyped field).
//!
//! Both fail the whole discovery pass. A missing document is never an error;
//! lookups return `Option`.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for Vitrine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading and parsing content.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed front matter block or unparseable body markup.
    #[error("Content parse error{}: {message}", location(.path, .line))]
    ContentParse {
        /// Source file, once known.
        path: Option<PathBuf>,
        /// 1-based line in the source file, when obtainable.
        line: Option<usize>,
        /// What went wrong.
        message: String,
    },

    /// Structurally valid but semantically invalid content.
    #[error("Content validation error{}: {message}", location(.path, &None))]
    ContentValidation {
        /// Offending file, once known.
        path: Option<PathBuf>,
        /// What went wrong.
        message: String,
    },

    /// I/O error, optionally tied to a path.
    #[error("I/O error{}: {source}", location(.path, &None))]
    Io {
        /// Path being accessed, if known.
        path: Option<PathBuf>,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn location(path: &Option<PathBuf>, line: &Option<usize>) -> String {
    match (path, line) {
        (Some(path), Some(line)) => format!(" in {}:{line}", path.display()),
        (Some(path), None) => format!(" in {}", path.display()),
        (None, Some(line)) => format!(" at line {line}"),
        (None, None) => String::new(),
    }
}

impl Error {
    /// Creates a content parse error without location.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::ContentParse {
            path: None,
            line: None,
            message: message.into(),
        }
    }

    /// Creates a content parse error at a 1-based line.
    pub fn parse_at<S: Into<String>>(line: usize, message: S) -> Self {
        Error::ContentParse {
            path: None,
            line: Some(line),
            message: message.into(),
        }
    }

    /// Creates a content validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::ContentValidation {
            path: None,
            message: message.into(),
        }
    }

    /// Creates a content validation error for a specific file.
    pub fn validation_in<P, S>(path: P, message: S) -> Self
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Error::ContentValidation {
            path: Some(path.into()),
            message: message.into(),
        }
    }

    /// Wraps an I/O error without a path.
    pub fn io(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }

    /// Wraps an I/O error with the path that was being accessed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Attaches a source file to content and I/O errors that lack one.
    ///
    /// Errors that already name a file keep it.
    pub fn in_file(self, file: impl AsRef<Path>) -> Self {
        let file = file.as_ref();
        match self {
            Error::ContentParse {
                path: None,
                line,
                message,
            } => Error::ContentParse {
                path: Some(file.to_path_buf()),
                line,
                message,
            },
            Error::ContentValidation {
                path: None,
                message,
            } => Error::ContentValidation {
                path: Some(file.to_path_buf()),
                message,
            },
            Error::Io { path: None, source } => Error::Io {
                path: Some(file.to_path_buf()),
                source,
            },
            other => other,
        }
    }

    /// The file this error refers to, if known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::ContentParse { path, .. }
            | Error::ContentValidation { path, .. }
            | Error::Io { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    /// The 1-based source line, for parse errors that know it.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::ContentParse { line, .. } => *line,
            _ => None,
        }
    }

    /// Returns `true` for parse and validation errors (authoring mistakes).
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            Error::ContentParse { .. } | Error::ContentValidation { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::io(source)
    }
}
