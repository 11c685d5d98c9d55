//! pipeline::changeset
//!
//! Change-Set Resolver: unions three independent detection signals into a
//! single deduplicated set of candidate document paths.
//!
//! # Signals
//!
//! - **A, remote divergence**: fetch, resolve the comparison branch, and
//!   diff it against the working tip, restricted to the content directory.
//!   Catches documents whose committed state differs from what is upstream
//!   even when the working tree is clean.
//! - **B, missing remote id**: enumerate documents directly under the
//!   content directory (non-recursive) and include every one whose header
//!   lacks a valid `id`. Guarantees a never-published document is always a
//!   candidate, independent of version-control state.
//! - **C, working-tree status**: porcelain status restricted to the
//!   content directory; untracked, modified, added, and renamed entries
//!   (rename destinations only).
//!
//! # Failure Isolation
//!
//! The signals run concurrently; they are read-only and independent. A
//! failing signal contributes the empty set and a warning; it never aborts
//! the batch or cancels its siblings.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context as _, Result};

use super::branch::resolve_comparison_branch;
use crate::core::document::{Document, RemoteIdState};
use crate::git::parse::{in_content_dir, normalize_repo_path, parse_status_porcelain};
use crate::git::Vcs;
use crate::ui::output::{self, Verbosity};

/// The resolved candidate set, with per-signal attribution retained for
/// reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    /// Union of all three signals, deduplicated. BTreeSet gives the
    /// deterministic iteration order the audit trail relies on.
    pub candidates: BTreeSet<String>,
    /// Signal A contribution.
    pub from_diff: BTreeSet<String>,
    /// Signal B contribution.
    pub from_missing_id: BTreeSet<String>,
    /// Signal C contribution.
    pub from_status: BTreeSet<String>,
}

impl ChangeSet {
    /// Whether no signal produced any candidate.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The signals that contributed a given path, as short labels.
    pub fn attribution(&self, path: &str) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.from_diff.contains(path) {
            labels.push("diff");
        }
        if self.from_missing_id.contains(path) {
            labels.push("missing-id");
        }
        if self.from_status.contains(path) {
            labels.push("status");
        }
        labels
    }
}

/// Resolves the candidate set for one invocation.
pub struct ChangeSetResolver<'a> {
    vcs: &'a dyn Vcs,
    /// Repository root on disk (for the directory scan of signal B).
    root: &'a Path,
    /// Content directory, repository-root-relative, normalized.
    content_dir: String,
    remote: String,
    verbosity: Verbosity,
}

impl<'a> ChangeSetResolver<'a> {
    pub fn new(
        vcs: &'a dyn Vcs,
        root: &'a Path,
        content_dir: &str,
        remote: &str,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            vcs,
            root,
            content_dir: normalize_repo_path(content_dir),
            remote: remote.to_string(),
            verbosity,
        }
    }

    /// Resolve the candidate set.
    ///
    /// Never fails: each signal degrades to an empty contribution with a
    /// warning, and the union of whatever succeeded is returned.
    pub async fn resolve(&self) -> ChangeSet {
        let (a, b, c) = tokio::join!(
            self.remote_divergence(),
            self.missing_remote_id(),
            self.working_tree_status(),
        );

        let from_diff = self.unwrap_signal(a, "remote divergence");
        let from_missing_id = self.unwrap_signal(b, "missing remote id");
        let from_status = self.unwrap_signal(c, "working-tree status");

        let mut candidates = BTreeSet::new();
        candidates.extend(from_diff.iter().cloned());
        candidates.extend(from_missing_id.iter().cloned());
        candidates.extend(from_status.iter().cloned());

        ChangeSet {
            candidates,
            from_diff,
            from_missing_id,
            from_status,
        }
    }

    fn unwrap_signal(&self, result: Result<BTreeSet<String>>, name: &str) -> BTreeSet<String> {
        match result {
            Ok(set) => set,
            Err(err) => {
                output::warn(
                    format!("{name} signal unavailable, continuing without it: {err:#}"),
                    self.verbosity,
                );
                BTreeSet::new()
            }
        }
    }

    /// Signal A: fetch, resolve the comparison branch, and diff it against
    /// the working tip. The declared sequence (fetch before resolve before
    /// diff) is a precondition of the fallback checks seeing fresh refs.
    async fn remote_divergence(&self) -> Result<BTreeSet<String>> {
        self.vcs
            .fetch(&self.remote)
            .await
            .context("fetching remote")?;

        let branch = resolve_comparison_branch(self.vcs, &self.remote)
            .await
            .context("resolving comparison branch")?;

        let names = self
            .vcs
            .diff_names(&branch, "HEAD", &self.content_dir)
            .await
            .context("diffing against comparison branch")?;

        Ok(names
            .iter()
            .map(|n| normalize_repo_path(n))
            .filter(|p| is_document(p) && in_content_dir(p, &self.content_dir))
            .collect())
    }

    /// Signal B: documents under the content directory whose header has no
    /// valid remote id. A malformed id is treated as absent, with a
    /// warning, so the document becomes a candidate rather than an error.
    async fn missing_remote_id(&self) -> Result<BTreeSet<String>> {
        let dir = self.root.join(&self.content_dir);
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .with_context(|| format!("reading content directory '{}'", dir.display()))?;

        let mut set = BTreeSet::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if !is_document(&name) {
                continue;
            }
            let rel = format!("{}/{}", self.content_dir, name);

            let text = match tokio::fs::read_to_string(entry.path()).await {
                Ok(text) => text,
                Err(err) => {
                    output::warn(format!("could not read '{rel}': {err}"), self.verbosity);
                    continue;
                }
            };

            match Document::parse(&text) {
                Ok(doc) => match doc.remote_id() {
                    RemoteIdState::Present(_) => {}
                    RemoteIdState::Absent => {
                        set.insert(rel);
                    }
                    RemoteIdState::Invalid(raw) => {
                        output::warn(
                            format!("'{rel}' has malformed id '{raw}', treating as unpublished"),
                            self.verbosity,
                        );
                        set.insert(rel);
                    }
                },
                Err(err) => {
                    // Still a candidate: the executor will surface the parse
                    // failure as a per-document outcome.
                    output::warn(format!("could not parse '{rel}': {err}"), self.verbosity);
                    set.insert(rel);
                }
            }
        }
        Ok(set)
    }

    /// Signal C: porcelain status restricted to the content directory.
    async fn working_tree_status(&self) -> Result<BTreeSet<String>> {
        let raw = self
            .vcs
            .status_porcelain(&self.content_dir)
            .await
            .context("querying working-tree status")?;

        Ok(parse_status_porcelain(&raw)
            .into_iter()
            .filter(|e| e.is_candidate())
            .map(|e| e.path)
            // Status can surface paths outside the requested scope.
            .filter(|p| is_document(p) && in_content_dir(p, &self.content_dir))
            .collect())
    }
}

/// Whether a path names a Markdown document.
fn is_document(path: &str) -> bool {
    path.ends_with(".md")
}
