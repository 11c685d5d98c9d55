//! pipeline::branch
//!
//! Remote Branch Resolver.
//!
//! # Algorithm
//!
//! Resolves the branch to diff against (and to fall back to as a push
//! target), in order:
//!
//! 1. the configured upstream tracking ref of the current branch, verbatim
//! 2. `<remote>/main`, if it exists
//! 3. `<remote>/master`, if it exists
//! 4. otherwise fail with [`BranchError::NoRemoteBranch`]
//!
//! This supports repositories with or without an explicit tracking branch
//! and both common default-branch names, without user configuration.
//!
//! # Preconditions
//!
//! Callers that want the fallback checks to see fresh remote refs must
//! fetch first; this resolver performs no fetch of its own.

use thiserror::Error;

use crate::git::{GitError, Vcs};

/// Errors from comparison-branch resolution.
#[derive(Debug, Error)]
pub enum BranchError {
    /// No upstream is configured and neither conventional default branch
    /// exists on the remote.
    #[error("no remote branch to compare against: no upstream configured, and neither {remote}/main nor {remote}/master exists")]
    NoRemoteBranch {
        /// The remote that was searched
        remote: String,
    },

    /// An underlying git command failed.
    #[error(transparent)]
    Git(#[from] GitError),
}

/// Resolve the branch to diff against.
pub async fn resolve_comparison_branch(
    vcs: &dyn Vcs,
    remote: &str,
) -> Result<String, BranchError> {
    if let Some(upstream) = vcs.upstream_ref().await? {
        return Ok(upstream);
    }

    for name in ["main", "master"] {
        let candidate = format!("{remote}/{name}");
        if vcs.ref_exists(&candidate).await? {
            return Ok(candidate);
        }
    }

    Err(BranchError::NoRemoteBranch {
        remote: remote.to_string(),
    })
}
