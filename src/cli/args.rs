//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inkpress - publish Markdown articles from a git repository
#[derive(Parser, Debug)]
#[command(name = "ink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if ink was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Publish changed documents and record the batch in git
    #[command(
        name = "publish",
        long_about = "Detect changed article documents, publish them to the remote \
            service, and record the batch as a git commit.\n\n\
            Candidates are found by unioning three signals: files that differ from \
            the remote comparison branch, files whose header has no article id yet, \
            and files with uncommitted changes. Each candidate is created or updated \
            remotely; newly assigned ids are written back into the file header. \
            Successful documents are then staged, committed, and pushed.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Publish everything that changed (most common usage)
    ink publish

    # See what would be published without touching anything
    ink publish --dry-run

    # Stage the entire working tree instead of just published files
    ink publish --stage-all

PER-DOCUMENT FAILURES:
    A document that fails (API error, unreadable file) is reported in the
    summary and excluded from the commit; the rest of the batch proceeds."
    )]
    Publish {
        /// Show the candidate set without publishing or committing
        #[arg(long)]
        dry_run: bool,

        /// Stage the entire working tree for the batch commit
        #[arg(long)]
        stage_all: bool,

        /// Directory containing article documents (overrides config)
        #[arg(long)]
        content_dir: Option<String>,
    },

    /// Show which documents would be published and why
    #[command(
        name = "status",
        long_about = "Show the current candidate set without publishing.\n\n\
            Lists every document the next 'ink publish' would process, annotated \
            with the signal(s) that selected it: diff (differs from the comparison \
            branch), missing-id (no article id in the header), or status \
            (uncommitted changes).",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check what a publish would pick up
    ink status

    # Check a non-default content directory
    ink status --content-dir drafts"
    )]
    Status {
        /// Directory containing article documents (overrides config)
        #[arg(long)]
        content_dir: Option<String>,
    },

    /// List your articles on the remote service
    #[command(
        name = "list",
        long_about = "List the authenticated user's articles on the remote service.\n\n\
            Prints one line per article: id, title, and URL. Useful for finding \
            the id of an article whose local file lost its header, or for checking \
            what is already published.",
        after_help = "\
WORKFLOW EXAMPLES:
    # See everything you've published
    ink list

    # Recover a lost id
    ink list | grep \"My Article Title\""
    )]
    List,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for ink commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    ink completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    ink completion zsh >> ~/.zshrc

    # Fish
    ink completion fish > ~/.config/fish/completions/ink.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_anywhere() {
        let cli = Cli::try_parse_from(["ink", "publish", "--quiet", "--dry-run"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::Publish { dry_run: true, .. }));

        let cli = Cli::try_parse_from(["ink", "--cwd", "/tmp", "status"]).unwrap();
        assert_eq!(cli.cwd.as_deref(), Some(std::path::Path::new("/tmp")));
    }

    #[test]
    fn content_dir_override_parses() {
        let cli =
            Cli::try_parse_from(["ink", "publish", "--content-dir", "drafts"]).unwrap();
        match cli.command {
            Command::Publish { content_dir, .. } => {
                assert_eq!(content_dir.as_deref(), Some("drafts"));
            }
            _ => panic!("expected publish"),
        }
    }
}
