//! Engine configuration, read from a TOML file.
//!
//! ```toml
//! save_path = "story_save.json"
//! story_dirs = ["stories"]
//! autosave = false
//! validate_targets = false
//! log_filter = "warn"
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::snapshot::DEFAULT_SAVE_FILE;

/// Configuration for a [`crate::StoryManager`] and the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// File the single save slot is written to.
    pub save_path: PathBuf,

    /// Directories whose `*.json` story definitions are registered at startup.
    pub story_dirs: Vec<PathBuf>,

    /// Save after every choice that moves the cursor.
    pub autosave: bool,

    /// Reject definitions with a missing start node or dangling choice
    /// targets at registration instead of failing mid-session.
    pub validate_targets: bool,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            story_dirs: Vec::new(),
            autosave: false,
            validate_targets: false,
            log_filter: "warn".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
