//! Inkpress - keep Markdown articles in sync with a remote publishing service
//!
//! Inkpress is a single-binary tool that publishes a directory of Markdown
//! articles (each with a YAML front-matter header) to a dev.to-style articles
//! API, then commits and pushes the results. The interesting problem is
//! change reconciliation: deciding which articles need (re)publishing from
//! imperfect signals, and executing the publish as a multi-step transaction
//! whose steps can fail independently without corrupting local state.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to the pipeline)
//! - [`pipeline`] - The publish pipeline: context/branch resolution, change-set
//!   resolution, the publish transaction executor, and the commit orchestrator
//! - [`core`] - Domain types, the front-matter codec, configuration, image rewriting
//! - [`git`] - Single interface for all git command invocations
//! - [`remote`] - Abstraction for the remote publishing service
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. A document's remote id, once stamped, is never cleared; its presence is
//!    the sole signal routing a document to update rather than create
//! 2. At most one local file write and one outbound API call happen per
//!    document per invocation
//! 3. Per-document failures never abort sibling documents; only
//!    resolution-level failures terminate the batch

pub mod cli;
pub mod core;
pub mod git;
pub mod pipeline;
pub mod remote;
pub mod ui;
