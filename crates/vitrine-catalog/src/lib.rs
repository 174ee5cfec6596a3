//! Typed document catalog for Vitrine.
//!
//! Turns directories of front-matter-plus-Markdown files into an immutable,
//! queryable [`ContentRepository`].
//!
//! # Modules
//!
//! - [`config`]: category → directory mapping
//! - [`meta`]: metadata schemas ([`DocumentMeta`], [`ProductMeta`])
//! - [`document`]: a parsed file
//! - [`repository`]: loading and lookup
//! - [`paths`]: static route enumeration without rendering
//! - [`page`]: page head metadata

#![doc = include_str!("../README.md")]

pub mod config;
pub mod document;
pub mod meta;
pub mod page;
pub mod paths;
pub mod repository;

pub use config::{CatalogConfig, CategoryConfig, DEFAULT_EXTENSIONS};
pub use document::Document;
pub use meta::{DocumentMeta, ProductMeta, Status, parse_metadata};
pub use page::{OpenGraph, PageMetadata};
pub use paths::{StaticPath, enumerate_identifiers, static_paths};
pub use repository::{ContentRepository, load_category};
