//! Commit Operations
//!
//! Turning a composed message into a git commit, or into a preview when
//! running dry.

use std::process::{Command, Output};

use crate::errors::{GitError, Result};

use super::remote::git_push;

/// Program invoked for every git operation.
pub const GIT_PROGRAM: &str = "git";

/// Receives the final commit message once the user has confirmed it.
#[cfg_attr(test, mockall::automock)]
pub trait CommitExecutor {
    /// Commits all modified tracked files with `message`, or only prints
    /// what would be committed when `dry_run` is set.
    ///
    /// # Errors
    /// * If a git command cannot be spawned or exits unsuccessfully
    fn execute(&self, message: &str, dry_run: bool) -> Result<()>;
}

/// [`CommitExecutor`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCommitter {
    program: String,
    push: bool,
    verbose: bool,
}

impl GitCommitter {
    #[must_use]
    pub fn new() -> Self {
        GitCommitter {
            program: GIT_PROGRAM.to_string(),
            push: false,
            verbose: false,
        }
    }

    /// Uses another executable in place of `git`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Pushes to the remote after a successful commit.
    #[must_use]
    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for GitCommitter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitExecutor for GitCommitter {
    fn execute(&self, message: &str, dry_run: bool) -> Result<()> {
        if dry_run {
            println!("{}", format_dry_run(message, self.push));
            return Ok(());
        }

        if self.verbose {
            println!("Committing files...");
        }

        let output = Command::new(&self.program)
            .args(["commit", "-a", "-m", message])
            .output()?;

        handle_output(&self.program, "commit", &output, self.verbose)?;

        if self.push {
            git_push(&self.program, self.verbose)?;
        }

        Ok(())
    }
}

/// Builds the preview printed instead of committing.
#[must_use]
pub fn format_dry_run(message: &str, push: bool) -> String {
    let mut preview = format!("Would commit with message:\n---\n{message}\n---");

    if push {
        preview.push_str("\nWould push to remote repository");
    }

    preview
}

/// Handles the output of git commands.
///
/// On success, prints git's own output and, in verbose mode, a short
/// confirmation. On failure, returns a [`GitError::CommandFailed`] carrying
/// git's stderr.
///
/// # Arguments
/// * `program` - The executable that was run
/// * `method_name` - The git subcommand that was run (e.g., "commit", "push")
/// * `output` - The captured output of the command
/// * `verbose` - Whether to print verbose output
pub(super) fn handle_output(
    program: &str,
    method_name: &str,
    output: &Output,
    verbose: bool,
) -> Result<()> {
    if !output.status.success() {
        let mut error_output = String::from_utf8_lossy(&output.stderr).trim().to_string();

        // git reports "nothing to commit" on stdout
        if error_output.is_empty() {
            error_output = String::from_utf8_lossy(&output.stdout).trim().to_string();
        }

        return Err(GitError::CommandFailed {
            command: format!("{program} {method_name}"),
            output: error_output,
        }
        .into());
    }

    if verbose {
        println!("{method_name} successful!");
    }

    if !output.stdout.is_empty() {
        println!("{}", String::from_utf8_lossy(&output.stdout).trim());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::errors::ConvcomError;

    use super::*;

    const MISSING_PROGRAM: &str = "convcom-test-missing-git";

    #[test]
    fn test_dry_run_never_spawns_git() {
        // Spawning a program that does not exist would fail
        let committer = GitCommitter::new().with_program(MISSING_PROGRAM);

        assert!(committer.execute("feat(api): add health endpoint", true).is_ok());
    }

    #[test]
    fn test_dry_run_with_push_never_spawns_git() {
        let committer = GitCommitter::new()
            .with_program(MISSING_PROGRAM)
            .with_push(true);

        assert!(committer.execute("fix!: drop legacy field", true).is_ok());
    }

    #[test]
    fn test_missing_program_is_an_io_error() {
        let committer = GitCommitter::new().with_program(MISSING_PROGRAM);

        assert!(matches!(
            committer.execute("feat: add", false),
            Err(ConvcomError::Io(_))
        ));
    }

    #[test]
    fn test_format_dry_run() {
        assert_eq!(
            format_dry_run("feat(api): add health endpoint", false),
            "Would commit with message:\n---\nfeat(api): add health endpoint\n---"
        );
        assert!(format_dry_run("fix: x", true).ends_with("\nWould push to remote repository"));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_command() {
        let committer = GitCommitter::new().with_program("true").with_push(true);

        assert!(committer.execute("feat: add", false).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_wrapped() {
        let committer = GitCommitter::new().with_program("false");

        match committer.execute("feat: add", false) {
            Err(ConvcomError::Git(GitError::CommandFailed { command, .. })) => {
                assert_eq!(command, "false commit");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
