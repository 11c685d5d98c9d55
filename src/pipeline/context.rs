//! pipeline::context
//!
//! Repository Context Resolver.
//!
//! # Design
//!
//! Derives {owner, repo, current branch, upstream} from the version-control
//! remote configuration, once per invocation. Every failure (an
//! unparseable URL, a detached HEAD, a missing remote) yields an absent
//! field rather than an error; callers validate the fields they need before
//! using remote-dependent features. Image-URL rewriting in particular must
//! degrade to a no-op on an incomplete context, never fail the batch.

use crate::core::types::RepoContext;
use crate::git::parse::parse_owner_repo;
use crate::git::Vcs;

/// Resolve the repository context from the configured remote.
pub async fn resolve_context(vcs: &dyn Vcs, remote: &str) -> RepoContext {
    let mut ctx = RepoContext::default();

    if let Ok(Some(url)) = vcs.remote_url(remote).await {
        if let Some((owner, repo)) = parse_owner_repo(&url) {
            ctx.owner = Some(owner);
            ctx.repo = Some(repo);
        }
    }

    if let Ok(branch) = vcs.current_branch().await {
        // `rev-parse --abbrev-ref HEAD` prints "HEAD" on a detached head.
        if !branch.is_empty() && branch != "HEAD" {
            ctx.current_branch = Some(branch);
        }
    }

    if let Ok(Some(upstream)) = vcs.upstream_ref().await {
        ctx.upstream = Some(upstream);
    }

    ctx
}
