//! git::runner
//!
//! The [`Vcs`] service trait and its process-spawning implementation.
//!
//! # Design
//!
//! The trait surface mirrors exactly the commands the pipeline needs:
//! fetch, diff, status, ref resolution, staging, commit, and push. It is
//! async because the change-set signals run concurrently, and it is a trait
//! so tests can substitute [`super::mock::MockVcs`] for real processes.
//!
//! # Error Handling
//!
//! Exit code zero is success. Non-zero exit is surfaced as
//! [`GitError::CommandFailed`] carrying the captured standard-error text,
//! except for the handful of conditions that are answers rather than
//! failures (missing upstream, nonexistent ref, nothing to commit).

use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// The git binary could not be spawned.
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// A git command exited non-zero.
    #[error("git {command} failed: {stderr}")]
    CommandFailed {
        /// The subcommand and arguments that were run
        command: String,
        /// Captured standard-error text, trimmed
        stderr: String,
    },
}

/// Result of a commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitResult {
    /// A commit was created.
    #[default]
    Committed,
    /// The index had no changes; treated as success-no-op.
    NothingToCommit,
}

/// The version-control command surface the pipeline depends on.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the three change-set signals
/// borrow the same instance concurrently for read-only queries.
#[async_trait]
pub trait Vcs: Send + Sync {
    /// Fetch the given remote.
    async fn fetch(&self, remote: &str) -> Result<(), GitError>;

    /// List files added, modified, or renamed between `base` and `head`,
    /// restricted to `pathspec` (`diff --name-only --diff-filter=AMR`).
    async fn diff_names(
        &self,
        base: &str,
        head: &str,
        pathspec: &str,
    ) -> Result<Vec<String>, GitError>;

    /// Raw `status --porcelain --untracked-files=normal` output restricted
    /// to `pathspec`.
    async fn status_porcelain(&self, pathspec: &str) -> Result<String, GitError>;

    /// Name of the currently checked-out branch.
    async fn current_branch(&self) -> Result<String, GitError>;

    /// The upstream tracking ref of the current branch (e.g. `origin/main`),
    /// or `None` if no upstream is configured.
    async fn upstream_ref(&self) -> Result<Option<String>, GitError>;

    /// Whether `refname` resolves to an existing ref.
    async fn ref_exists(&self, refname: &str) -> Result<bool, GitError>;

    /// The configured URL of `remote`, or `None` if the remote does not
    /// exist.
    async fn remote_url(&self, remote: &str) -> Result<Option<String>, GitError>;

    /// Stage the given repository-relative paths.
    async fn stage(&self, paths: &[String]) -> Result<(), GitError>;

    /// Stage the entire working tree.
    async fn stage_all(&self) -> Result<(), GitError>;

    /// Commit the index with `message`.
    async fn commit(&self, message: &str) -> Result<CommitResult, GitError>;

    /// Push to the configured upstream (`git push` with no arguments).
    async fn push_upstream(&self) -> Result<(), GitError>;

    /// Push `refspec` to `remote`.
    async fn push(&self, remote: &str, refspec: &str) -> Result<(), GitError>;
}

/// [`Vcs`] implementation that invokes the external `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Repository root (toplevel of the working tree).
    root: PathBuf,
}

impl GitCli {
    /// Discover the repository containing `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepo`] if `dir` is not inside a git working
    /// tree.
    pub async fn discover(dir: &Path) -> Result<Self, GitError> {
        let output = git_command(dir, &["rev-parse", "--show-toplevel"])
            .output()
            .await?;
        if !output.status.success() {
            return Err(GitError::NotARepo {
                path: dir.to_path_buf(),
            });
        }
        let root = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        Ok(Self { root })
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command in the repository root, requiring exit code zero.
    async fn run(&self, args: &[&str]) -> Result<Output, GitError> {
        let output = git_command(&self.root, args).output().await?;
        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }

    /// Run a git command, returning the raw output regardless of exit code.
    async fn run_unchecked(&self, args: &[&str]) -> Result<Output, GitError> {
        Ok(git_command(&self.root, args).output().await?)
    }
}

/// Build a git command with interactive prompting suppressed.
fn git_command(dir: &Path, args: &[&str]) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("git");
    cmd.args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

fn stdout_string(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[async_trait]
impl Vcs for GitCli {
    async fn fetch(&self, remote: &str) -> Result<(), GitError> {
        self.run(&["fetch", remote]).await?;
        Ok(())
    }

    async fn diff_names(
        &self,
        base: &str,
        head: &str,
        pathspec: &str,
    ) -> Result<Vec<String>, GitError> {
        let output = self
            .run(&[
                "diff",
                "--name-only",
                "--diff-filter=AMR",
                base,
                head,
                "--",
                pathspec,
            ])
            .await?;
        Ok(stdout_string(&output)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    async fn status_porcelain(&self, pathspec: &str) -> Result<String, GitError> {
        let output = self
            .run(&[
                "status",
                "--porcelain",
                "--untracked-files=normal",
                "--",
                pathspec,
            ])
            .await?;
        Ok(stdout_string(&output))
    }

    async fn current_branch(&self) -> Result<String, GitError> {
        let output = self.run(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(stdout_string(&output).trim().to_string())
    }

    async fn upstream_ref(&self) -> Result<Option<String>, GitError> {
        // Exits non-zero when no upstream is configured; that is an answer,
        // not a failure.
        let output = self
            .run_unchecked(&[
                "rev-parse",
                "--abbrev-ref",
                "--symbolic-full-name",
                "@{upstream}",
            ])
            .await?;
        if output.status.success() {
            let name = stdout_string(&output).trim().to_string();
            Ok((!name.is_empty()).then_some(name))
        } else {
            Ok(None)
        }
    }

    async fn ref_exists(&self, refname: &str) -> Result<bool, GitError> {
        let output = self
            .run_unchecked(&["rev-parse", "--verify", "--quiet", refname])
            .await?;
        Ok(output.status.success())
    }

    async fn remote_url(&self, remote: &str) -> Result<Option<String>, GitError> {
        let output = self.run_unchecked(&["remote", "get-url", remote]).await?;
        if output.status.success() {
            let url = stdout_string(&output).trim().to_string();
            Ok((!url.is_empty()).then_some(url))
        } else {
            Ok(None)
        }
    }

    async fn stage(&self, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args).await?;
        Ok(())
    }

    async fn stage_all(&self) -> Result<(), GitError> {
        self.run(&["add", "--all"]).await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<CommitResult, GitError> {
        let output = self.run_unchecked(&["commit", "-m", message]).await?;
        if output.status.success() {
            return Ok(CommitResult::Committed);
        }
        let stdout = stdout_string(&output);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if stdout.contains("nothing to commit")
            || stderr.contains("nothing to commit")
            || stdout.contains("nothing added to commit")
        {
            return Ok(CommitResult::NothingToCommit);
        }
        Err(GitError::CommandFailed {
            command: "commit".to_string(),
            stderr: if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            },
        })
    }

    async fn push_upstream(&self) -> Result<(), GitError> {
        self.run(&["push"]).await?;
        Ok(())
    }

    async fn push(&self, remote: &str, refspec: &str) -> Result<(), GitError> {
        self.run(&["push", remote, refspec]).await?;
        Ok(())
    }
}
