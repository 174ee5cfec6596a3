//! Vitrine Core: shared errors, identifiers, and file utilities.
//!
//! This crate provides the foundational types used across all Vitrine crates.
//! It has no internal Vitrine dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`util`]: File discovery, path, and ID utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::files::discover_files;
pub use util::ids::{is_url_safe_slug, normalize_id};
pub use util::resolver::PathResolver;
