//! Utility modules for file discovery, path handling, and identifiers.
//!
//! # Modules
//!
//! - [`files`]: Async content file discovery
//! - [`ids`]: ID normalization and slug checks
//! - [`paths`]: Generic path utilities (tilde expansion, marker search)
//! - [`resolver`]: Config file and content root resolution

pub mod files;
pub mod ids;
pub mod paths;
pub mod resolver;
