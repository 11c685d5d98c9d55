//! pipeline::commit
//!
//! Git Commit Orchestrator.
//!
//! # Sequence
//!
//! After the executor finishes, the orchestrator records the batch in git:
//!
//! 1. **Stage**: the published documents' paths (or the whole tree when
//!    stage-all is configured).
//! 2. **Commit**: with a message enumerating the batch. "Nothing to commit"
//!    is a success no-op, not an error.
//! 3. **Push**: to the configured upstream, or to the resolved comparison
//!    branch when no upstream exists.
//!
//! # Failure Semantics
//!
//! Remote publications already happened by the time this runs, so a
//! failure here must not look like a failed publish. Stage and commit
//! errors stop the sequence and are reported; a push failure is reported
//! and otherwise ignored, leaving the commit local.
//!
//! The orchestrator does not run at all when nothing was published.

use crate::git::{CommitResult, Vcs};
use crate::ui::output::{self, Verbosity};

use super::branch::resolve_comparison_branch;
use super::outcome::{published_paths, PublishOutcome};

/// Records a publish batch as a git commit and pushes it.
pub struct CommitOrchestrator<'a> {
    vcs: &'a dyn Vcs,
    remote: &'a str,
    stage_all: bool,
    verbosity: Verbosity,
}

impl<'a> CommitOrchestrator<'a> {
    pub fn new(vcs: &'a dyn Vcs, remote: &'a str, stage_all: bool, verbosity: Verbosity) -> Self {
        Self {
            vcs,
            remote,
            stage_all,
            verbosity,
        }
    }

    /// Stage, commit, and push the batch. Infallible by contract; every
    /// git failure is reported rather than returned.
    pub async fn finalize(&self, outcomes: &[PublishOutcome]) {
        let paths = published_paths(outcomes);
        if paths.is_empty() {
            output::debug("no published documents, skipping commit", self.verbosity);
            return;
        }

        let staged = if self.stage_all {
            self.vcs.stage_all().await
        } else {
            self.vcs.stage(&paths).await
        };
        if let Err(err) = staged {
            output::error(format!("staging failed, commit not attempted: {err}"));
            return;
        }

        match self.vcs.commit(&commit_message(outcomes)).await {
            Ok(CommitResult::Committed) => {
                output::print(
                    format!("Committed {} document(s)", paths.len()),
                    self.verbosity,
                );
            }
            Ok(CommitResult::NothingToCommit) => {
                // Already-committed work can still be unpushed, so the push
                // step runs regardless.
                output::print("Nothing to commit", self.verbosity);
            }
            Err(err) => {
                output::error(format!("commit failed: {err}"));
                return;
            }
        }

        if let Err(err) = self.push().await {
            output::error(format!("push failed, commit is local only: {err}"));
        }
    }

    /// Push to the upstream when configured, otherwise to the branch the
    /// change-set diff compared against.
    async fn push(&self) -> Result<(), String> {
        let upstream = self.vcs.upstream_ref().await.map_err(|e| e.to_string())?;
        if upstream.is_some() {
            return self.vcs.push_upstream().await.map_err(|e| e.to_string());
        }

        let branch = resolve_comparison_branch(self.vcs, self.remote)
            .await
            .map_err(|e| e.to_string())?;
        // "origin/main" splits into the push target remote and branch.
        match branch.split_once('/') {
            Some((remote, name)) => self
                .vcs
                .push(remote, &format!("HEAD:{name}"))
                .await
                .map_err(|e| e.to_string()),
            None => Err(format!("unexpected comparison branch shape: {branch}")),
        }
    }
}

/// Render the batch commit message: a count on the first line, then one
/// line per published document with its id, action, and URL.
pub fn commit_message(outcomes: &[PublishOutcome]) -> String {
    let published: Vec<_> = outcomes.iter().filter(|o| o.is_published()).collect();
    let mut lines = vec![format!("publish: {} article(s)", published.len()), String::new()];
    for outcome in published {
        let (id, url) = match &outcome.status {
            super::outcome::OutcomeStatus::Created { id, url } => (id, url),
            super::outcome::OutcomeStatus::Updated { id, url } => (id, url),
            _ => unreachable!("filtered to published outcomes"),
        };
        lines.push(format!(
            "{} (#{id}) {} {url}",
            outcome.basename(),
            outcome.action()
        ));
    }
    lines.join("\n")
}
