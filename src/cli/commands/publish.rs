//! cli::commands::publish
//!
//! Publish changed documents and record the batch in git.
//!
//! # Sequence
//!
//! 1. Discover the repository and load configuration
//! 2. Resolve the repository context and the candidate set
//! 3. Publish each candidate (create or update, stamping new ids)
//! 4. Stage, commit, and push the successful documents
//!
//! # Exit Status
//!
//! Per-document failures are reported in the summary but do not fail the
//! invocation; callers inspect the summary, not the exit code, for them.
//! Only resolution-level failures (not a repository, unreadable config,
//! missing API key) exit non-zero.
//!
//! # Example
//!
//! ```bash
//! # Publish everything that changed
//! ink publish
//!
//! # Preview the candidate set
//! ink publish --dry-run
//! ```

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, API_KEY_ENV};
use crate::core::document::{Document, RemoteIdState};
use crate::git::GitCli;
use crate::pipeline::{
    render_summary, resolve_context, ChangeSetResolver, CommitOrchestrator, PublishExecutor,
};
use crate::remote::DevtoClient;
use crate::ui::output;

/// Run the publish command.
///
/// This is a synchronous wrapper that uses tokio to run the async
/// implementation.
pub fn publish(
    ctx: &Context,
    dry_run: bool,
    stage_all: bool,
    content_dir: Option<&str>,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(publish_async(ctx, dry_run, stage_all, content_dir))
}

/// Async implementation of publish.
async fn publish_async(
    ctx: &Context,
    dry_run: bool,
    stage_all: bool,
    content_dir: Option<&str>,
) -> Result<()> {
    let verbosity = ctx.verbosity();
    let cwd = ctx.working_dir()?;

    let git = GitCli::discover(&cwd).await?;
    let config = Config::load(Some(git.root())).context("loading configuration")?;

    let content_dir = content_dir
        .map(String::from)
        .unwrap_or_else(|| config.content_dir());
    let remote = config.remote();
    let stage_all = stage_all || config.stage_all();

    let repo_ctx = resolve_context(&git, &remote).await;
    output::debug(format!("repository context: {repo_ctx:?}"), verbosity);

    let resolver = ChangeSetResolver::new(&git, git.root(), &content_dir, &remote, verbosity);
    let change_set = resolver.resolve().await;

    if change_set.is_empty() {
        output::print("Nothing to publish.", verbosity);
        return Ok(());
    }

    if dry_run {
        output::print(
            format!("Would publish {} document(s):", change_set.candidates.len()),
            verbosity,
        );
        for path in &change_set.candidates {
            let action = routing_decision(git.root(), path).await;
            output::print(
                format!(
                    "  {path}: {action} [{}]",
                    change_set.attribution(path).join(", ")
                ),
                verbosity,
            );
        }
        return Ok(());
    }

    let Some(api_key) = config.api_key() else {
        bail!("no API key configured; set {API_KEY_ENV} or add api_key to the config file");
    };
    let publisher = DevtoClient::with_api_base(api_key, config.api_base());

    let executor = PublishExecutor::new(
        &publisher,
        git.root(),
        &repo_ctx,
        config.organization_id(),
        verbosity,
    );
    let outcomes = executor.process(&change_set.candidates).await;

    output::print(render_summary(&outcomes), verbosity);

    CommitOrchestrator::new(&git, &remote, stage_all, verbosity)
        .finalize(&outcomes)
        .await;

    Ok(())
}

/// The action a real run would take for a candidate, for dry-run reporting.
/// Mirrors the executor's routing without calling the remote service.
async fn routing_decision(root: &Path, path: &str) -> &'static str {
    let text = match tokio::fs::read_to_string(root.join(path)).await {
        Ok(text) => text,
        Err(_) => return "would fail (unreadable)",
    };
    let doc = match Document::parse(&text) {
        Ok(doc) => doc,
        Err(_) => return "would fail (invalid header)",
    };
    if !doc.has_title() {
        return "would skip (missing title)";
    }
    match doc.remote_id() {
        RemoteIdState::Present(_) => "would update",
        RemoteIdState::Invalid(_) | RemoteIdState::Absent => "would create",
    }
}
