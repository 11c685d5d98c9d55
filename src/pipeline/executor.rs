//! pipeline::executor
//!
//! Publish Transaction Executor.
//!
//! # State Machine
//!
//! Per candidate document:
//!
//! ```text
//! Loaded -> Skipped(missing title)
//!        -> Routed -> Create -> Created | Failed
//!                  -> Update -> Updated | Failed
//! ```
//!
//! 1. **Load**: read and parse the on-disk document; failure is terminal.
//! 2. **Title guard**: no usable title means Skipped, and the document is
//!    excluded from the commit set entirely.
//! 3. **Body transform**: rewrite image references for the outbound payload
//!    only; the on-disk body is never altered by this step.
//! 4. **Routing**: a valid `id` routes to update; an absent or malformed
//!    id routes to create (malformed warns; creating with a stale id is
//!    safer than failing the document).
//! 5. **Create**: on success, stamp the assigned id into the file. This is
//!    the only local write the executor ever performs.
//! 6. **Update**: on success the file is untouched; the document still
//!    belongs in the commit set because remote state changed.
//!
//! # Sequencing
//!
//! Candidates are processed strictly sequentially. Each success mutates
//! shared state (the document file, and transitively the working tree the
//! commit step will query), and the remote service is a shared,
//! rate-limited resource. At most one file write and one outbound call
//! happen per document; there are no retries at this layer.

use std::collections::BTreeSet;
use std::path::Path;

use crate::core::document::{self, Document, RemoteIdState};
use crate::core::images;
use crate::core::types::{RemoteId, RepoContext};
use crate::remote::{ArticlePayload, Publisher};
use crate::ui::output::{self, Verbosity};

use super::outcome::{OutcomeStatus, PublishOutcome};

/// Executes the per-document publish transactions.
pub struct PublishExecutor<'a> {
    publisher: &'a dyn Publisher,
    /// Repository root; candidate paths are relative to it.
    root: &'a Path,
    repo_ctx: &'a RepoContext,
    /// Organization id applied when a header omits one.
    default_org: Option<u64>,
    verbosity: Verbosity,
}

impl<'a> PublishExecutor<'a> {
    pub fn new(
        publisher: &'a dyn Publisher,
        root: &'a Path,
        repo_ctx: &'a RepoContext,
        default_org: Option<u64>,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            publisher,
            root,
            repo_ctx,
            default_org,
            verbosity,
        }
    }

    /// Process every candidate, in candidate order, recording one outcome
    /// each. Never fails: per-document errors become `Failed` outcomes.
    pub async fn process(&self, candidates: &BTreeSet<String>) -> Vec<PublishOutcome> {
        let mut outcomes = Vec::with_capacity(candidates.len());
        for path in candidates {
            let outcome = self.process_one(path).await;
            // The end-of-run summary enumerates every outcome; per-document
            // progress is debug-only.
            output::debug(&outcome, self.verbosity);
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn process_one(&self, path: &str) -> PublishOutcome {
        // Load
        let text = match tokio::fs::read_to_string(self.root.join(path)).await {
            Ok(text) => text,
            Err(err) => return failed(path, format!("could not read file: {err}")),
        };
        let doc = match Document::parse(&text) {
            Ok(doc) => doc,
            Err(err) => return failed(path, format!("could not parse document: {err}")),
        };

        // Title guard
        if !doc.has_title() {
            return PublishOutcome {
                path: path.to_string(),
                status: OutcomeStatus::Skipped {
                    reason: "missing title".to_string(),
                },
            };
        }

        // Body transform (outbound payload only)
        let doc_dir = path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        let publish_body = images::rewrite(&doc.body, doc_dir, self.repo_ctx);
        let payload = self.payload_from(&doc, publish_body);

        // Routing
        match doc.remote_id() {
            RemoteIdState::Present(id) => self.update(path, id, &payload).await,
            RemoteIdState::Invalid(raw) => {
                output::warn(
                    format!("'{path}' has malformed id '{raw}', creating a new article"),
                    self.verbosity,
                );
                self.create(path, &text, &payload).await
            }
            RemoteIdState::Absent => self.create(path, &text, &payload).await,
        }
    }

    async fn create(&self, path: &str, text: &str, payload: &ArticlePayload) -> PublishOutcome {
        let created = match self.publisher.create(payload).await {
            Ok(created) => created,
            Err(err) => return failed(path, err.to_string()),
        };

        let id = match RemoteId::new(created.id) {
            Ok(id) => id,
            Err(err) => return failed(path, format!("service returned unusable id: {err}")),
        };

        // Stamp the id back into the file; everything else is preserved
        // byte-for-byte relative to what was read at load time.
        let stamped = match document::stamp_remote_id(text, id) {
            Ok(stamped) => stamped,
            Err(err) => {
                return failed(
                    path,
                    format!("created remotely as #{id} but could not stamp id: {err}"),
                )
            }
        };
        if let Err(err) = tokio::fs::write(self.root.join(path), stamped).await {
            return failed(
                path,
                format!("created remotely as #{id} but could not write file: {err}"),
            );
        }

        PublishOutcome {
            path: path.to_string(),
            status: OutcomeStatus::Created {
                id,
                url: created.url,
            },
        }
    }

    async fn update(&self, path: &str, id: RemoteId, payload: &ArticlePayload) -> PublishOutcome {
        match self.publisher.update(id.value(), payload).await {
            Ok(updated) => PublishOutcome {
                path: path.to_string(),
                status: OutcomeStatus::Updated {
                    id,
                    url: updated.url,
                },
            },
            Err(err) => failed(path, err.to_string()),
        }
    }

    /// Assemble the outbound payload from the header, applying defaults:
    /// unpublished, no tags, empty description, null reference fields.
    fn payload_from(&self, doc: &Document, body: String) -> ArticlePayload {
        ArticlePayload {
            title: doc.title().unwrap_or_default().to_string(),
            body_markdown: body,
            published: doc.published(),
            tags: doc.tags(),
            series: doc.str_field("series").map(String::from),
            main_image: doc.str_field("main_image").map(String::from),
            canonical_url: doc.str_field("canonical_url").map(String::from),
            description: doc.str_field("description").unwrap_or_default().to_string(),
            organization_id: doc.u64_field("organization_id").or(self.default_org),
        }
    }
}

fn failed(path: &str, error: String) -> PublishOutcome {
    PublishOutcome {
        path: path.to_string(),
        status: OutcomeStatus::Failed { error },
    }
}
