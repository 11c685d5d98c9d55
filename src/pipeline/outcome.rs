//! pipeline::outcome
//!
//! Per-document publish outcomes and the end-of-run summary.
//!
//! One [`PublishOutcome`] is recorded per candidate per invocation, in
//! candidate order; the sequence is the batch's audit trail and is immutable
//! once recorded.

use std::fmt;

use crate::core::types::RemoteId;

/// Terminal state of one document's publish transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The article was created and its id stamped locally.
    Created {
        /// Identifier assigned by the service.
        id: RemoteId,
        /// Web URL of the article.
        url: String,
    },
    /// The existing article was updated.
    Updated {
        /// The identifier the update was addressed to.
        id: RemoteId,
        /// Web URL of the article.
        url: String,
    },
    /// The document was excluded from the batch (e.g. missing title).
    Skipped {
        /// Human-readable reason.
        reason: String,
    },
    /// The transaction failed; the document was left untouched locally
    /// except for mutations that happened before the failure.
    Failed {
        /// Captured error text.
        error: String,
    },
}

/// Outcome of one candidate document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Repository-root-relative path.
    pub path: String,
    /// Terminal state.
    pub status: OutcomeStatus,
}

impl PublishOutcome {
    /// Whether the remote side was successfully created or updated.
    pub fn is_published(&self) -> bool {
        matches!(
            self.status,
            OutcomeStatus::Created { .. } | OutcomeStatus::Updated { .. }
        )
    }

    /// The action keyword for messages and summaries.
    pub fn action(&self) -> &'static str {
        match self.status {
            OutcomeStatus::Created { .. } => "created",
            OutcomeStatus::Updated { .. } => "updated",
            OutcomeStatus::Skipped { .. } => "skipped",
            OutcomeStatus::Failed { .. } => "failed",
        }
    }

    /// The file basename, used in commit messages.
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            OutcomeStatus::Created { id, url } => {
                write!(f, "{}: created (#{id}) {url}", self.path)
            }
            OutcomeStatus::Updated { id, url } => {
                write!(f, "{}: updated (#{id}) {url}", self.path)
            }
            OutcomeStatus::Skipped { reason } => write!(f, "{}: skipped ({reason})", self.path),
            OutcomeStatus::Failed { error } => write!(f, "{}: failed - {error}", self.path),
        }
    }
}

/// Paths of outcomes whose documents belong in the commit set.
pub fn published_paths(outcomes: &[PublishOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter(|o| o.is_published())
        .map(|o| o.path.clone())
        .collect()
}

/// Render the structured end-of-run summary: every candidate with its
/// terminal outcome, in candidate order.
pub fn render_summary(outcomes: &[PublishOutcome]) -> String {
    let published = outcomes.iter().filter(|o| o.is_published()).count();
    let mut lines = vec![format!(
        "Processed {} document(s), {} published:",
        outcomes.len(),
        published
    )];
    for outcome in outcomes {
        lines.push(format!("  {outcome}"));
    }
    lines.join("\n")
}
