//! pipeline
//!
//! The publish pipeline: resolve → execute → finalize.
//!
//! # Architecture
//!
//! One invocation flows through four stages:
//!
//! 1. **Context resolution** ([`context`]): derive {owner, repo, branch,
//!    upstream} from the git remote configuration. Absent fields degrade
//!    remote-dependent features instead of failing.
//! 2. **Change-set resolution** ([`changeset`], using [`branch`]): union
//!    three independent signals into a deduplicated candidate set. The
//!    signals run concurrently; they are read-only and their failures are
//!    isolated.
//! 3. **Publish execution** ([`executor`]): per candidate, strictly
//!    sequential, create or update the remote article and stamp newly
//!    assigned ids back into the file. Per-document failures are recorded
//!    as outcomes, never propagated.
//! 4. **Commit orchestration** ([`commit`]): stage, commit, and push the
//!    batch. Finalization failures are reported but never roll back the
//!    already-applied remote calls or file writes.
//!
//! # Concurrency Model
//!
//! Only the change-set signals fan out concurrently. Document processing is
//! deliberately sequential: each success mutates shared state (a document
//! file and, transitively, the working tree), and the remote service is a
//! shared, rate-limited resource that sequential calls keep happy.

pub mod branch;
pub mod changeset;
pub mod commit;
pub mod context;
pub mod executor;
pub mod outcome;

pub use branch::{resolve_comparison_branch, BranchError};
pub use changeset::{ChangeSet, ChangeSetResolver};
pub use commit::{commit_message, CommitOrchestrator};
pub use context::resolve_context;
pub use executor::PublishExecutor;
pub use outcome::{published_paths, render_summary, OutcomeStatus, PublishOutcome};
