//! git::parse
//!
//! Parsing functions for git command output and remote URLs.
//!
//! # Design
//!
//! Command-output parsing is kept in named, exhaustively tested functions
//! rather than inline in control flow. The known input space is small:
//! porcelain v1 status codes, rename arrows, quote-wrapped paths, and the
//! two remote URL shapes (SSH and HTTPS).

use std::sync::OnceLock;

use regex::Regex;

/// A single entry parsed from `git status --porcelain` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Two-character status code (e.g. `??`, ` M`, `A `, `R `).
    pub code: String,
    /// Repository-root-relative path, forward slashes, unquoted. For
    /// renames this is the destination path.
    pub path: String,
}

impl StatusEntry {
    /// Whether this entry counts as a change-set candidate: untracked,
    /// modified, added, or renamed.
    pub fn is_candidate(&self) -> bool {
        self.code == "??" || self.code.chars().any(|c| matches!(c, 'M' | 'A' | 'R'))
    }
}

/// Parse `git status --porcelain` output into entries.
///
/// Handles rename arrows (`R  old -> new`, destination kept) and unwraps a
/// single layer of surrounding double quotes (git quotes paths containing
/// special characters). Paths are normalized to forward slashes with no
/// leading `./`.
pub fn parse_status_porcelain(output: &str) -> Vec<StatusEntry> {
    let mut entries = Vec::new();
    for line in output.lines() {
        if line.len() < 4 {
            continue;
        }
        let code = &line[..2];
        let rest = &line[3..];

        // Renames report "old -> new"; only the destination exists on disk.
        let raw_path = match rest.split_once(" -> ") {
            Some((_, dest)) => dest,
            None => rest,
        };

        let path = normalize_repo_path(unquote(raw_path));
        if path.is_empty() {
            continue;
        }

        entries.push(StatusEntry {
            code: code.to_string(),
            path,
        });
    }
    entries
}

/// Strip one layer of surrounding double quotes, if present.
fn unquote(path: &str) -> &str {
    let trimmed = path.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Normalize a path to repository-root-relative form with forward slashes.
pub fn normalize_repo_path(path: &str) -> String {
    let forward = path.replace('\\', "/");
    forward
        .strip_prefix("./")
        .unwrap_or(&forward)
        .trim_matches('/')
        .to_string()
}

/// Whether `path`'s containing directory is exactly `content_dir`.
///
/// The scan is non-recursive, so nested subdirectories do not match.
pub fn in_content_dir(path: &str, content_dir: &str) -> bool {
    let dir = normalize_repo_path(content_dir);
    match path.rsplit_once('/') {
        Some((parent, _)) => parent == dir,
        None => dir.is_empty(),
    }
}

fn ssh_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^git@[^:/]+:([^/]+)/([^/]+?)(?:\.git)?/?$").expect("static regex")
    })
}

fn https_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https?://[^/]+/([^/]+)/([^/]+?)(?:\.git)?/?$").expect("static regex")
    })
}

/// Parse `{owner, repo}` out of a git remote URL.
///
/// Supports the SSH shape (`git@host:owner/repo.git`) and the HTTPS shape
/// (`https://host/owner/repo[.git]`), tried in that order. Returns `None`
/// for anything else; callers treat that as absent context rather than an
/// error.
pub fn parse_owner_repo(url: &str) -> Option<(String, String)> {
    let url = url.trim();
    for re in [ssh_url_re(), https_url_re()] {
        if let Some(caps) = re.captures(url) {
            return Some((caps[1].to_string(), caps[2].to_string()));
        }
    }
    None
}
