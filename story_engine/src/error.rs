//! Error types for the story manager and configuration.

use std::path::PathBuf;

use story_graph::StoryError;

/// Errors raised by [`crate::StoryManager`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    /// A story definition or the play loop failed.
    #[error(transparent)]
    Story(#[from] StoryError),

    /// Story selection number outside the registry.
    #[error("no story number {index}: pick a number from 1 to {count}")]
    OutOfRange { index: i64, count: usize },

    /// An operation needs a selected story and none is.
    #[error("no story is selected")]
    NoActiveStory,

    /// Nothing has been saved yet.
    #[error("no save file at {}", path.display())]
    NoSaveFile { path: PathBuf },

    /// The save file exists but is not a valid snapshot.
    #[error("save file {} is corrupt: {reason}", path.display())]
    CorruptSave { path: PathBuf, reason: String },

    /// The snapshot names a story that is not registered.
    #[error("saved story '{title}' is not available")]
    UnknownStory { title: String },

    /// Reading or writing the save file failed.
    #[error("failed to access save file {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A story definition file could not be read.
    #[error("failed to read story file {}: {source}", path.display())]
    StoryFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManagerError {
    /// Create a CorruptSave error.
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptSave {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a Persistence error.
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Conditions a menu reports and carries on from.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. }
                | Self::NoActiveStory
                | Self::NoSaveFile { .. }
                | Self::UnknownStory { .. }
        )
    }

    /// True when the reader's input stream closed mid-session.
    pub fn is_end_of_input(&self) -> bool {
        matches!(
            self,
            Self::Story(StoryError::Input(err)) if err.kind() == std::io::ErrorKind::UnexpectedEof
        )
    }
}

/// Errors raised while loading [`crate::EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
