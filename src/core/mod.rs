//! core
//!
//! Core domain types, schemas, and operations for Inkpress.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RemoteId, RepoContext
//! - [`document`] - Article documents and the front-matter codec
//! - [`config`] - Configuration schema and loading
//! - [`images`] - Relative image-reference rewriting for outbound payloads
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Parsing lives in named functions with exhaustive unit tests, never
//!   inline in control flow

pub mod config;
pub mod document;
pub mod images;
pub mod types;
