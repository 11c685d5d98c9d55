//! core::images
//!
//! Rewrites local-relative image references to remote-accessible URLs.
//!
//! # Design
//!
//! Published article bodies cannot reference images by repository-relative
//! path, so outbound payloads get `![alt](relative.png)` references rewritten
//! to `https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{path}`.
//! The rewrite applies to the outbound payload only; the on-disk body is
//! never altered.
//!
//! If the repository context is incomplete (owner, repo, or branch absent),
//! rewriting degrades to a no-op instead of failing the batch.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::types::RepoContext;

/// Matches a Markdown image reference, capturing alt text and target.
fn image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").expect("static regex"))
}

/// Rewrite relative image references in `body` for publication.
///
/// `doc_dir` is the repository-root-relative directory containing the
/// document (forward slashes, no leading `./`); relative targets are
/// resolved against it.
pub fn rewrite(body: &str, doc_dir: &str, ctx: &RepoContext) -> String {
    let (owner, repo, branch) = match (&ctx.owner, &ctx.repo, &ctx.current_branch) {
        (Some(o), Some(r), Some(b)) => (o, r, b),
        _ => return body.to_string(),
    };

    image_re()
        .replace_all(body, |caps: &Captures<'_>| {
            let alt = &caps[1];
            let target = &caps[2];
            if is_absolute_target(target) {
                return caps[0].to_string();
            }
            let path = join_repo_path(doc_dir, target);
            format!("![{alt}](https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{path})")
        })
        .into_owned()
}

/// Whether an image target is already remote-accessible.
fn is_absolute_target(target: &str) -> bool {
    target.starts_with("http://")
        || target.starts_with("https://")
        || target.starts_with("//")
        || target.starts_with("data:")
}

/// Join a relative image target onto the document's directory, collapsing
/// `./` and `../` segments.
fn join_repo_path(doc_dir: &str, target: &str) -> String {
    let mut segments: Vec<&str> = doc_dir.split('/').filter(|s| !s.is_empty()).collect();

    // A leading '/' means repository-root-relative.
    let target = if let Some(rooted) = target.strip_prefix('/') {
        segments.clear();
        rooted
    } else {
        target
    };

    for seg in target.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
