//! git
//!
//! Single interface for all git operations.
//!
//! # Architecture
//!
//! This module is the only doorway to git. Every repository read and write
//! flows through the [`Vcs`] trait, implemented by [`GitCli`] which invokes
//! the external `git` binary and interprets its textual and exit-code
//! output. No other module spawns git processes.
//!
//! Commands run with `GIT_TERMINAL_PROMPT=0` so the underlying tool can
//! never block a batch waiting for credentials.
//!
//! # Responsibilities
//!
//! - Remote fetch, diff, and status queries (read-only)
//! - Ref and branch resolution (`rev-parse`, upstream lookup)
//! - Staging, committing, and pushing
//! - Parsing of porcelain status output and remote URLs ([`parse`])
//!
//! # Testing
//!
//! [`mock::MockVcs`] provides a deterministic in-memory implementation for
//! unit tests that simulate command output without spawning processes.

pub mod mock;
pub mod parse;
mod runner;

pub use runner::{CommitResult, GitCli, GitError, Vcs};
