//! Errors raised while building or traversing a story graph.

use crate::node::NodeId;

/// Errors raised by story nodes and the play loop.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// A choice number outside `1..=available`.
    #[error("invalid choice {index}: pick a number from 1 to {available}")]
    InvalidChoice { index: i64, available: usize },

    /// The reader typed something that is not a number.
    #[error("'{input}' is not a number")]
    ParseError { input: String },

    /// The cursor points at a node the story does not contain.
    #[error("story has no node '{id}'")]
    UnknownNode { id: NodeId },

    /// A story definition is missing required fields or is otherwise unusable.
    #[error("malformed story definition: {0}")]
    MalformedDefinition(String),

    /// Reading a choice from the session failed.
    #[error("failed to read choice: {0}")]
    Input(#[from] std::io::Error),
}

impl StoryError {
    /// Create an InvalidChoice error.
    pub fn invalid_choice(index: i64, available: usize) -> Self {
        Self::InvalidChoice { index, available }
    }

    /// Create a ParseError for raw input.
    pub fn parse(input: impl Into<String>) -> Self {
        Self::ParseError {
            input: input.into(),
        }
    }

    /// Create an UnknownNode error.
    pub fn unknown_node(id: impl Into<NodeId>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    /// Create a MalformedDefinition error.
    pub fn malformed(message: impl ToString) -> Self {
        Self::MalformedDefinition(message.to_string())
    }

    /// Errors the play loop reports and re-prompts on instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidChoice { .. } | Self::ParseError { .. })
    }
}
