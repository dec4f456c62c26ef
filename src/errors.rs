use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the convcom application
#[derive(Error, Debug)]
pub enum ConvcomError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Menu '{prompt}' has no items to choose from")]
    EmptyMenu { prompt: String },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error while accessing config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration file not found at {} - run 'convcom -init' first", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration file {} already exists", .path.display())]
    ConfigAlreadyExists { path: PathBuf },

    #[error("Invalid configuration format - please check your convcom.json syntax: {reason}")]
    InvalidConfig { reason: String },

    #[error("Configuration declares no commit types - add at least one entry to \"types\"")]
    NoTypes,

    #[error("Invalid label '{label}' - labels cannot be empty or contain spaces, parentheses, ':' or '!'")]
    InvalidLabel { label: String },
}

/// Git-related errors
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not in a git repository - please run this command from within a git repository")]
    RepositoryNotFound,

    #[error("Git command failed: {command}\nOutput: {output}")]
    CommandFailed { command: String, output: String },
}

/// Type alias for Result using `ConvcomError`
pub type Result<T> = std::result::Result<T, ConvcomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts_into_top_level() {
        let error: ConvcomError = ConfigError::NoTypes.into();

        assert!(matches!(error, ConvcomError::Config(ConfigError::NoTypes)));
        assert!(error.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_command_failed_message_contains_output() {
        let error = GitError::CommandFailed {
            command: "git commit".to_string(),
            output: "nothing to commit".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("git commit"));
        assert!(message.contains("nothing to commit"));
    }
}
