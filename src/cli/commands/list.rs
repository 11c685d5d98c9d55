//! cli::commands::list
//!
//! List the authenticated user's articles on the remote service.
//!
//! # Example
//!
//! ```bash
//! ink list
//! ```
//!
//! Output:
//!
//! ```text
//! 42    My First Article            https://dev.to/me/my-first-article
//! 57    Another Article (draft)     https://dev.to/me/another-article
//! ```

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, API_KEY_ENV};
use crate::git::GitCli;
use crate::remote::{DevtoClient, Publisher};

/// Run the list command.
pub fn list(ctx: &Context) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(list_async(ctx))
}

/// Async implementation of list.
async fn list_async(ctx: &Context) -> Result<()> {
    let cwd = ctx.working_dir()?;

    // Repo config participates when run inside a repository, but listing
    // works from anywhere.
    let repo_root = match GitCli::discover(&cwd).await {
        Ok(git) => Some(git.root().to_path_buf()),
        Err(_) => None,
    };
    let config = Config::load(repo_root.as_deref()).context("loading configuration")?;

    let Some(api_key) = config.api_key() else {
        bail!("no API key configured; set {API_KEY_ENV} or add api_key to the config file");
    };
    let publisher = DevtoClient::with_api_base(api_key, config.api_base());

    let articles = publisher.list_mine().await?;
    if articles.is_empty() {
        println!("No articles.");
        return Ok(());
    }

    for article in articles {
        let marker = if article.published { "" } else { " (draft)" };
        println!("{}\t{}{}\t{}", article.id, article.title, marker, article.url);
    }

    Ok(())
}
