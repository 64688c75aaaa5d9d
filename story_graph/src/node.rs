//! Story nodes - the immutable units of narrative content.

use serde::{Deserialize, Serialize};

use crate::error::StoryError;

/// Key of a node within its owning story.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An outgoing choice edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOption {
    /// Text shown to the reader.
    pub label: String,
    /// Node the choice leads to. Not checked against the graph.
    pub target: NodeId,
}

impl StoryOption {
    pub fn new(label: impl Into<String>, target: impl Into<NodeId>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// A point in the narrative graph with text and zero or more choices.
///
/// Nodes are built once when their story is registered and never change
/// afterwards, so there are no mutating accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryNode {
    id: NodeId,
    text: String,
    options: Vec<StoryOption>,
}

impl StoryNode {
    /// Create a terminal node with the given text.
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            options: Vec::new(),
        }
    }

    /// Append a choice. Choices keep the order they are added in.
    pub fn with_option(mut self, label: impl Into<String>, target: impl Into<NodeId>) -> Self {
        self.options.push(StoryOption::new(label, target));
        self
    }

    /// Append several choices.
    pub fn with_options(mut self, options: impl IntoIterator<Item = StoryOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of choices on this node.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Choices paired with their 1-based number, in stored order.
    ///
    /// Every renderer goes through this so the number a reader types always
    /// matches the number `resolve_choice` expects.
    pub fn options(&self) -> impl Iterator<Item = (usize, &StoryOption)> + '_ {
        self.options.iter().enumerate().map(|(i, opt)| (i + 1, opt))
    }

    /// A node without choices ends the story, whatever its text says.
    pub fn is_terminal(&self) -> bool {
        self.options.is_empty()
    }

    /// Resolve a 1-based choice number to the target node id.
    pub fn resolve_choice(&self, index: i64) -> Result<&NodeId, StoryError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.options.get(i))
            .map(|opt| &opt.target)
            .ok_or_else(|| StoryError::invalid_choice(index, self.options.len()))
    }
}
