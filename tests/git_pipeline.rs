//! Integration tests for the git interface and change-set resolution.
//!
//! These tests use real git repositories created via tempfile to verify
//! that the process-spawning [`GitCli`] and the pipeline stages built on it
//! behave correctly against actual git operations.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use inkpress::git::{CommitResult, GitCli, GitError, Vcs};
use inkpress::pipeline::{resolve_comparison_branch, resolve_context, ChangeSetResolver};
use inkpress::ui::output::Verbosity;

/// Test fixture: a working repository with a local bare "origin".
struct TestRepo {
    dir: TempDir,
    remote_dir: TempDir,
}

impl TestRepo {
    /// Create a repository with an initial commit pushed to a bare remote,
    /// with upstream tracking configured.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let remote_dir = TempDir::new().expect("failed to create temp dir");

        run_git(remote_dir.path(), &["init", "--bare", "-b", "main"]);

        run_git(dir.path(), &["init", "-b", "main"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);

        std::fs::write(dir.path().join("README.md"), "# Test Repo\n").unwrap();
        run_git(dir.path(), &["add", "README.md"]);
        run_git(dir.path(), &["commit", "-m", "Initial commit"]);

        let remote_path = remote_dir.path().to_str().unwrap().to_string();
        run_git(dir.path(), &["remote", "add", "origin", &remote_path]);
        run_git(dir.path(), &["push", "-u", "origin", "main"]);

        Self { dir, remote_dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open the Vcs interface to this repository.
    async fn vcs(&self) -> GitCli {
        GitCli::discover(self.path())
            .await
            .expect("failed to open test repo")
    }

    /// Write a file without committing it.
    fn write_file(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, content).unwrap();
    }

    /// Write a file and commit it.
    fn commit_file(&self, path: &str, content: &str, message: &str) {
        self.write_file(path, content);
        run_git(self.path(), &["add", path]);
        run_git(self.path(), &["commit", "-m", message]);
    }

    /// Last commit subject on the current branch.
    fn last_commit_subject(&self) -> String {
        let output = Command::new("git")
            .args(["log", "-1", "--format=%s"])
            .current_dir(self.path())
            .output()
            .expect("git log failed");
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }

    /// Tip commit of a branch on the bare remote.
    fn remote_tip(&self, branch: &str) -> String {
        let output = Command::new("git")
            .args(["rev-parse", branch])
            .current_dir(self.remote_dir.path())
            .output()
            .expect("git rev-parse failed");
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

#[tokio::test]
async fn discover_finds_repo_from_subdirectory() {
    let repo = TestRepo::new();
    let sub = repo.path().join("posts");
    std::fs::create_dir_all(&sub).unwrap();

    let git = GitCli::discover(&sub).await.unwrap();
    assert_eq!(
        git.root().canonicalize().unwrap(),
        repo.path().canonicalize().unwrap()
    );
}

#[tokio::test]
async fn discover_outside_repo_fails() {
    let dir = TempDir::new().unwrap();
    let err = GitCli::discover(dir.path()).await.unwrap_err();
    assert!(matches!(err, GitError::NotARepo { .. }));
}

#[tokio::test]
async fn branch_and_upstream_queries() {
    let repo = TestRepo::new();
    let vcs = repo.vcs().await;

    assert_eq!(vcs.current_branch().await.unwrap(), "main");
    assert_eq!(
        vcs.upstream_ref().await.unwrap().as_deref(),
        Some("origin/main")
    );
    assert!(vcs.ref_exists("origin/main").await.unwrap());
    assert!(!vcs.ref_exists("origin/nope").await.unwrap());
    assert!(vcs.remote_url("origin").await.unwrap().is_some());
    assert!(vcs.remote_url("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn upstream_absent_when_not_configured() {
    let repo = TestRepo::new();
    run_git(repo.path(), &["branch", "--unset-upstream"]);

    let vcs = repo.vcs().await;
    assert_eq!(vcs.upstream_ref().await.unwrap(), None);

    // The fallback chain still resolves via origin/main.
    let branch = resolve_comparison_branch(&vcs, "origin").await.unwrap();
    assert_eq!(branch, "origin/main");
}

#[tokio::test]
async fn diff_names_reports_changes_since_remote_branch() {
    let repo = TestRepo::new();
    repo.commit_file("posts/new.md", "---\ntitle: n\n---\n", "add post");
    repo.commit_file("other/skip.txt", "x", "unrelated");

    let vcs = repo.vcs().await;
    let names = vcs.diff_names("origin/main", "HEAD", "posts").await.unwrap();
    assert_eq!(names, vec!["posts/new.md"]);
}

#[tokio::test]
async fn status_porcelain_sees_untracked_and_modified() {
    let repo = TestRepo::new();
    repo.commit_file("posts/live.md", "---\ntitle: l\nid: 1\n---\nv1\n", "post");
    repo.write_file("posts/live.md", "---\ntitle: l\nid: 1\n---\nv2\n");
    repo.write_file("posts/new.md", "---\ntitle: n\n---\n");

    let vcs = repo.vcs().await;
    let raw = vcs.status_porcelain("posts").await.unwrap();
    assert!(raw.contains("posts/live.md"));
    assert!(raw.contains("?? posts/new.md"));
}

#[tokio::test]
async fn context_resolves_from_real_repo() {
    let repo = TestRepo::new();
    run_git(
        repo.path(),
        &[
            "remote",
            "set-url",
            "origin",
            "git@github.com:octocat/articles.git",
        ],
    );

    let vcs = repo.vcs().await;
    let ctx = resolve_context(&vcs, "origin").await;
    assert_eq!(ctx.owner.as_deref(), Some("octocat"));
    assert_eq!(ctx.repo.as_deref(), Some("articles"));
    assert_eq!(ctx.current_branch.as_deref(), Some("main"));
    assert_eq!(ctx.upstream.as_deref(), Some("origin/main"));
}

#[tokio::test]
async fn changeset_unions_real_git_signals() {
    let repo = TestRepo::new();
    // Committed ahead of the remote: signal A.
    repo.commit_file(
        "posts/committed.md",
        "---\ntitle: c\nid: 3\n---\n",
        "add committed post",
    );
    // On disk without an id: signal B (and C, untracked).
    repo.write_file("posts/draft.md", "---\ntitle: d\n---\n");

    let vcs = repo.vcs().await;
    let resolver = ChangeSetResolver::new(&vcs, repo.path(), "posts", "origin", Verbosity::Quiet);
    let change_set = resolver.resolve().await;

    let candidates: Vec<_> = change_set.candidates.iter().cloned().collect();
    assert_eq!(candidates, vec!["posts/committed.md", "posts/draft.md"]);
    assert_eq!(change_set.attribution("posts/committed.md"), vec!["diff"]);
    assert_eq!(
        change_set.attribution("posts/draft.md"),
        vec!["missing-id", "status"]
    );
}

#[tokio::test]
async fn changeset_without_remote_still_finds_local_work() {
    let repo = TestRepo::new();
    run_git(repo.path(), &["branch", "--unset-upstream"]);
    run_git(repo.path(), &["remote", "remove", "origin"]);
    repo.write_file("posts/draft.md", "---\ntitle: d\n---\n");

    let vcs = repo.vcs().await;
    let resolver = ChangeSetResolver::new(&vcs, repo.path(), "posts", "origin", Verbosity::Quiet);
    let change_set = resolver.resolve().await;

    // Signal A degraded; B and C still found the draft.
    assert!(change_set.from_diff.is_empty());
    assert!(change_set.candidates.contains("posts/draft.md"));
}

#[tokio::test]
async fn stage_commit_and_push_round_trip() {
    let repo = TestRepo::new();
    repo.write_file("posts/a.md", "---\ntitle: a\nid: 1\n---\n");

    let vcs = repo.vcs().await;
    vcs.stage(&["posts/a.md".to_string()]).await.unwrap();
    let result = vcs.commit("publish: 1 article(s)").await.unwrap();
    assert_eq!(result, CommitResult::Committed);
    assert_eq!(repo.last_commit_subject(), "publish: 1 article(s)");

    vcs.push_upstream().await.unwrap();
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(repo.path())
        .output()
        .unwrap();
    let local_tip = String::from_utf8(output.stdout).unwrap().trim().to_string();
    assert_eq!(repo.remote_tip("main"), local_tip);
}

#[tokio::test]
async fn commit_with_clean_index_is_nothing_to_commit() {
    let repo = TestRepo::new();
    let vcs = repo.vcs().await;

    let result = vcs.commit("publish: 0 article(s)").await.unwrap();
    assert_eq!(result, CommitResult::NothingToCommit);
}

#[tokio::test]
async fn fetch_against_local_bare_remote() {
    let repo = TestRepo::new();
    let vcs = repo.vcs().await;
    vcs.fetch("origin").await.unwrap();

    let err = vcs.fetch("nonexistent").await.unwrap_err();
    assert!(matches!(err, GitError::CommandFailed { .. }));
}
