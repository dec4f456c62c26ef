//! Remote Operations
//!
//! Pushing the freshly created commit.

use std::process::Command;

use crate::errors::Result;

use super::commit::handle_output;

/// Pushes committed changes to the configured upstream.
///
/// # Arguments
/// * `program` - The git executable
/// * `verbose` - Whether to print verbose output during the operation
///
/// # Errors
/// * If the push command cannot be spawned
/// * If the push fails (no remote configured, rejected, authentication...)
pub fn git_push(program: &str, verbose: bool) -> Result<()> {
    if verbose {
        println!("\nPushing...");
    }

    let output = Command::new(program).arg("push").output()?;

    handle_output(program, "push", &output, verbose)
}
