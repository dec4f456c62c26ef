//! Configuration Management Module for convcom
//!
//! This module handles the project configuration file, including
//! - Reading and validating `convcom.json`
//! - Creating a default configuration with `convcom -init`
//!
//! # Configuration Structure
//!
//! The configuration is stored in JSON format as `convcom.json` in the
//! directory convcom is run from:
//!
//! ```json
//! {
//!   "types": ["feat", "fix"],
//!   "scopes": ["api"]
//! }
//! ```
//!
//! `types` feeds the first menu and must not be empty; `scopes` is optional.

use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, Result};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "convcom.json";

/// Commit types written by `convcom -init`.
pub const DEFAULT_TYPES: [&str; 11] = [
    "build", "ci", "chore", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

/// Commit types and scopes offered by the menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub types: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            types: DEFAULT_TYPES.iter().map(ToString::to_string).collect(),
            scopes: Vec::new(),
        }
    }
}

impl Config {
    /// Checks that the configuration can produce valid commit headers.
    ///
    /// # Errors
    /// * If `types` is empty
    /// * If a type or scope is empty or contains characters that would break
    ///   the `type(scope)!: message` header
    pub fn validate(&self) -> Result<()> {
        if self.types.is_empty() {
            return Err(ConfigError::NoTypes.into());
        }

        let label_regex = Config::get_regex_label()?;

        if let Some(label) = self
            .types
            .iter()
            .chain(self.scopes.iter())
            .find(|label| !label_regex.is_match(label))
        {
            return Err(ConfigError::InvalidLabel {
                label: label.clone(),
            }
            .into());
        }

        Ok(())
    }

    fn get_regex_label() -> Result<Regex> {
        Regex::new(r"^[^\s():!]+$").map_err(|e| ConfigError::Regex(e).into())
    }
}

/// Location of the configuration file and the operations on it
pub struct ConfigFile {
    root: PathBuf,
}

impl ConfigFile {
    /// Targets `convcom.json` in the current working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(".")
    }

    /// Targets `convcom.json` inside a custom root directory.
    ///
    /// # Arguments
    /// * `root` - The directory holding the configuration file
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        ConfigFile { root: root.into() }
    }

    /// Returns the path to the configuration file
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Reads, parses and validates the configuration file.
    ///
    /// # Errors
    /// * If the file does not exist
    /// * If the file cannot be read
    /// * If the content is not a valid configuration (see [`Config::validate`])
    pub fn load(&self) -> Result<Config> {
        let path = self.path();

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::ConfigNotFound { path: path.clone() },
            _ => ConfigError::Io(e),
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidConfig {
                reason: e.to_string(),
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Creates the configuration file with the default commit types.
    ///
    /// The file is opened with create-new semantics, so an existing
    /// configuration is never touched.
    ///
    /// # Errors
    /// * If the file already exists
    /// * If an I/O error occurs while writing it
    ///
    /// # Returns
    /// The path of the created file
    pub fn create_default(&self) -> Result<PathBuf> {
        let path = self.path();
        let mut content = serde_json::to_string_pretty(&Config::default())?;
        content.push('\n');

        write_new_file(&path, &content)?;

        Ok(path)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new()
    }
}

fn write_new_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => ConfigError::ConfigAlreadyExists {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Io(e),
        })?;

    file.write_all(content.as_bytes())
        .map_err(ConfigError::Io)?;

    Ok(())
}
