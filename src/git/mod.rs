//! Git Operations Module
//!
//! Everything convcom does with `git`: detecting the repository and running
//! the commit (and optional push) once the message is composed.

pub mod commit;
pub mod remote;
pub mod repository;

pub use commit::{CommitExecutor, GitCommitter};
pub use repository::find_git_root;
