//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`RemoteId`] - Identifier assigned by the publishing service
//! - [`RepoContext`] - Repository coordinates derived from the git remote
//!
//! # Validation
//!
//! [`RemoteId`] enforces validity at construction time: it is always a
//! positive integer. A header value that fails to parse is represented as
//! "absent" by callers, never as an invalid id.

use std::fmt;

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid remote id: {0}")]
    InvalidRemoteId(String),
}

/// The identifier assigned by the publishing service on first creation.
///
/// Stored in a document's front-matter header under the `id` key. Once
/// stamped it is never cleared; its presence routes the document to the
/// update operation instead of create.
///
/// # Example
///
/// ```
/// use inkpress::core::types::RemoteId;
///
/// let id = RemoteId::parse("42").unwrap();
/// assert_eq!(id.value(), 42);
///
/// assert!(RemoteId::parse("not-a-number").is_err());
/// assert!(RemoteId::parse("0").is_err());
/// assert!(RemoteId::parse("-3").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteId(u64);

impl RemoteId {
    /// Create a remote id from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRemoteId` if the value is zero.
    pub fn new(value: u64) -> Result<Self, TypeError> {
        if value == 0 {
            return Err(TypeError::InvalidRemoteId(
                "remote id must be positive".into(),
            ));
        }
        Ok(Self(value))
    }

    /// Parse a remote id from its string form.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRemoteId` if the string is not a positive
    /// integer.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let value: u64 = raw
            .trim()
            .parse()
            .map_err(|_| TypeError::InvalidRemoteId(raw.to_string()))?;
        Self::new(value)
    }

    /// The raw integer value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repository coordinates derived from the git remote configuration.
///
/// Resolved once per invocation and immutable afterward. Every field is
/// optional: a parse or command failure yields an absent field rather than
/// an error, and callers validate the fields they need. In particular,
/// image-URL rewriting degrades to a no-op when owner or repository name
/// is absent rather than failing the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoContext {
    /// Repository owner (user or organization).
    pub owner: Option<String>,
    /// Repository name.
    pub repo: Option<String>,
    /// Name of the currently checked-out branch.
    pub current_branch: Option<String>,
    /// Upstream tracking ref for the current branch (e.g. `origin/main`),
    /// if one is configured.
    pub upstream: Option<String>,
}

impl RepoContext {
    /// Whether both owner and repository name were resolved.
    ///
    /// Remote-dependent features (image URL rewriting) require this.
    pub fn has_remote_coords(&self) -> bool {
        self.owner.is_some() && self.repo.is_some()
    }
}
