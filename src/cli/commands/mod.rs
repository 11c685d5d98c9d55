//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Wires the git, config, and remote layers into the pipeline
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! publish, status, and list are async because they involve process and
//! network I/O. Each handler is a synchronous wrapper that builds a tokio
//! runtime and blocks on the async implementation.

mod completion;
mod list;
mod publish;
mod status;

pub use completion::completion;
pub use list::list;
pub use publish::publish;
pub use status::status;

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Publish {
            dry_run,
            stage_all,
            content_dir,
        } => publish::publish(ctx, dry_run, stage_all, content_dir.as_deref()),
        Command::Status { content_dir } => status::status(ctx, content_dir.as_deref()),
        Command::List => list::list(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
