//! git::mock
//!
//! Mock [`Vcs`] implementation for deterministic testing.
//!
//! # Design
//!
//! The mock holds canned command output in memory and records every
//! operation for verification, so pipeline tests can simulate git behavior
//! (including failures) without spawning processes.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::runner::{CommitResult, GitError, Vcs};

/// Mock version-control surface for tests.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockVcs {
    inner: Arc<Mutex<MockVcsInner>>,
}

#[derive(Debug, Default)]
struct MockVcsInner {
    remote_url: Option<String>,
    current_branch: Option<String>,
    upstream: Option<String>,
    refs: HashSet<String>,
    diff_names: Vec<String>,
    status_output: String,
    commit_result: CommitResult,
    fail_on: Vec<FailOn>,
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail, with the stderr text the
/// simulated command would have produced.
#[derive(Debug, Clone)]
pub enum FailOn {
    Fetch(String),
    DiffNames(String),
    Status(String),
    CurrentBranch(String),
    Stage(String),
    Commit(String),
    Push(String),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Fetch { remote: String },
    DiffNames { base: String, head: String, pathspec: String },
    Status { pathspec: String },
    Stage { paths: Vec<String> },
    StageAll,
    Commit { message: String },
    PushUpstream,
    Push { remote: String, refspec: String },
}

impl MockVcs {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URL returned for any remote.
    pub fn set_remote_url(&self, url: impl Into<String>) {
        self.inner.lock().unwrap().remote_url = Some(url.into());
    }

    /// Set the current branch name.
    pub fn set_current_branch(&self, branch: impl Into<String>) {
        self.inner.lock().unwrap().current_branch = Some(branch.into());
    }

    /// Set the configured upstream tracking ref.
    pub fn set_upstream(&self, upstream: impl Into<String>) {
        self.inner.lock().unwrap().upstream = Some(upstream.into());
    }

    /// Mark a ref as existing.
    pub fn add_ref(&self, refname: impl Into<String>) {
        self.inner.lock().unwrap().refs.insert(refname.into());
    }

    /// Set the paths returned by diff queries.
    pub fn set_diff_names(&self, names: &[&str]) {
        self.inner.lock().unwrap().diff_names = names.iter().map(|s| s.to_string()).collect();
    }

    /// Set the raw porcelain status output.
    pub fn set_status_output(&self, output: impl Into<String>) {
        self.inner.lock().unwrap().status_output = output.into();
    }

    /// Set the result of the next commit.
    pub fn set_commit_result(&self, result: CommitResult) {
        self.inner.lock().unwrap().commit_result = result;
    }

    /// Configure an operation to fail.
    pub fn fail_on(&self, fail: FailOn) {
        self.inner.lock().unwrap().fail_on.push(fail);
    }

    /// All recorded operations, in order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    fn record(&self, op: MockOperation) {
        self.inner.lock().unwrap().operations.push(op);
    }

    fn failure(&self, pick: impl Fn(&FailOn) -> Option<&String>, command: &str) -> Option<GitError> {
        let inner = self.inner.lock().unwrap();
        inner.fail_on.iter().find_map(|f| {
            pick(f).map(|stderr| GitError::CommandFailed {
                command: command.to_string(),
                stderr: stderr.clone(),
            })
        })
    }
}

#[async_trait]
impl Vcs for MockVcs {
    async fn fetch(&self, remote: &str) -> Result<(), GitError> {
        self.record(MockOperation::Fetch {
            remote: remote.to_string(),
        });
        if let Some(err) = self.failure(
            |f| match f {
                FailOn::Fetch(m) => Some(m),
                _ => None,
            },
            "fetch",
        ) {
            return Err(err);
        }
        Ok(())
    }

    async fn diff_names(
        &self,
        base: &str,
        head: &str,
        pathspec: &str,
    ) -> Result<Vec<String>, GitError> {
        self.record(MockOperation::DiffNames {
            base: base.to_string(),
            head: head.to_string(),
            pathspec: pathspec.to_string(),
        });
        if let Some(err) = self.failure(
            |f| match f {
                FailOn::DiffNames(m) => Some(m),
                _ => None,
            },
            "diff",
        ) {
            return Err(err);
        }
        Ok(self.inner.lock().unwrap().diff_names.clone())
    }

    async fn status_porcelain(&self, pathspec: &str) -> Result<String, GitError> {
        self.record(MockOperation::Status {
            pathspec: pathspec.to_string(),
        });
        if let Some(err) = self.failure(
            |f| match f {
                FailOn::Status(m) => Some(m),
                _ => None,
            },
            "status",
        ) {
            return Err(err);
        }
        Ok(self.inner.lock().unwrap().status_output.clone())
    }

    async fn current_branch(&self) -> Result<String, GitError> {
        if let Some(err) = self.failure(
            |f| match f {
                FailOn::CurrentBranch(m) => Some(m),
                _ => None,
            },
            "rev-parse",
        ) {
            return Err(err);
        }
        self.inner
            .lock()
            .unwrap()
            .current_branch
            .clone()
            .ok_or_else(|| GitError::CommandFailed {
                command: "rev-parse --abbrev-ref HEAD".to_string(),
                stderr: "HEAD is not a branch".to_string(),
            })
    }

    async fn upstream_ref(&self) -> Result<Option<String>, GitError> {
        Ok(self.inner.lock().unwrap().upstream.clone())
    }

    async fn ref_exists(&self, refname: &str) -> Result<bool, GitError> {
        Ok(self.inner.lock().unwrap().refs.contains(refname))
    }

    async fn remote_url(&self, _remote: &str) -> Result<Option<String>, GitError> {
        Ok(self.inner.lock().unwrap().remote_url.clone())
    }

    async fn stage(&self, paths: &[String]) -> Result<(), GitError> {
        self.record(MockOperation::Stage {
            paths: paths.to_vec(),
        });
        if let Some(err) = self.failure(
            |f| match f {
                FailOn::Stage(m) => Some(m),
                _ => None,
            },
            "add",
        ) {
            return Err(err);
        }
        Ok(())
    }

    async fn stage_all(&self) -> Result<(), GitError> {
        self.record(MockOperation::StageAll);
        if let Some(err) = self.failure(
            |f| match f {
                FailOn::Stage(m) => Some(m),
                _ => None,
            },
            "add --all",
        ) {
            return Err(err);
        }
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<CommitResult, GitError> {
        self.record(MockOperation::Commit {
            message: message.to_string(),
        });
        if let Some(err) = self.failure(
            |f| match f {
                FailOn::Commit(m) => Some(m),
                _ => None,
            },
            "commit",
        ) {
            return Err(err);
        }
        Ok(self.inner.lock().unwrap().commit_result)
    }

    async fn push_upstream(&self) -> Result<(), GitError> {
        self.record(MockOperation::PushUpstream);
        if let Some(err) = self.failure(
            |f| match f {
                FailOn::Push(m) => Some(m),
                _ => None,
            },
            "push",
        ) {
            return Err(err);
        }
        Ok(())
    }

    async fn push(&self, remote: &str, refspec: &str) -> Result<(), GitError> {
        self.record(MockOperation::Push {
            remote: remote.to_string(),
            refspec: refspec.to_string(),
        });
        if let Some(err) = self.failure(
            |f| match f {
                FailOn::Push(m) => Some(m),
                _ => None,
            },
            "push",
        ) {
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_operations_in_order() {
        let vcs = MockVcs::new();
        vcs.fetch("origin").await.unwrap();
        vcs.status_porcelain("posts").await.unwrap();
        let ops = vcs.operations();
        assert_eq!(
            ops,
            vec![
                MockOperation::Fetch {
                    remote: "origin".into()
                },
                MockOperation::Status {
                    pathspec: "posts".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn configured_failure_surfaces_stderr() {
        let vcs = MockVcs::new();
        vcs.fail_on(FailOn::Fetch("could not resolve host".into()));
        let err = vcs.fetch("origin").await.unwrap_err();
        assert!(err.to_string().contains("could not resolve host"));
    }

    #[tokio::test]
    async fn canned_state_round_trips() {
        let vcs = MockVcs::new();
        vcs.set_remote_url("git@github.com:o/r.git");
        vcs.set_current_branch("main");
        vcs.set_upstream("origin/main");
        vcs.add_ref("origin/main");
        vcs.set_diff_names(&["posts/a.md"]);

        assert_eq!(
            vcs.remote_url("origin").await.unwrap().as_deref(),
            Some("git@github.com:o/r.git")
        );
        assert_eq!(vcs.current_branch().await.unwrap(), "main");
        assert_eq!(vcs.upstream_ref().await.unwrap().as_deref(), Some("origin/main"));
        assert!(vcs.ref_exists("origin/main").await.unwrap());
        assert!(!vcs.ref_exists("origin/master").await.unwrap());
        assert_eq!(
            vcs.diff_names("origin/main", "HEAD", "posts").await.unwrap(),
            vec!["posts/a.md"]
        );
    }
}
