//! cli::commands::status
//!
//! Show which documents would be published and why.
//!
//! # Example
//!
//! ```bash
//! ink status
//! ```
//!
//! Output:
//!
//! ```text
//! 2 candidate(s):
//!   posts/draft.md [missing-id, status]
//!   posts/live.md [diff]
//! ```

use anyhow::Result;

use crate::cli::Context;
use crate::core::config::Config;
use crate::git::GitCli;
use crate::pipeline::ChangeSetResolver;
use crate::ui::output;

/// Run the status command.
pub fn status(ctx: &Context, content_dir: Option<&str>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(status_async(ctx, content_dir))
}

/// Async implementation of status.
async fn status_async(ctx: &Context, content_dir: Option<&str>) -> Result<()> {
    let verbosity = ctx.verbosity();
    let cwd = ctx.working_dir()?;

    let git = GitCli::discover(&cwd).await?;
    let config = Config::load(Some(git.root()))?;

    let content_dir = content_dir
        .map(String::from)
        .unwrap_or_else(|| config.content_dir());
    let remote = config.remote();

    let resolver = ChangeSetResolver::new(&git, git.root(), &content_dir, &remote, verbosity);
    let change_set = resolver.resolve().await;

    if change_set.is_empty() {
        println!("Nothing to publish.");
        return Ok(());
    }

    println!("{} candidate(s):", change_set.candidates.len());
    for path in &change_set.candidates {
        println!("  {path} [{}]", change_set.attribution(path).join(", "));
    }

    output::debug(
        format!(
            "signals: diff={} missing-id={} status={}",
            change_set.from_diff.len(),
            change_set.from_missing_id.len(),
            change_set.from_status.len()
        ),
        verbosity,
    );

    Ok(())
}
