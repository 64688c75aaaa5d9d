//! Story definitions - the JSON shape stories are authored in.
//!
//! ```json
//! {
//!   "title": "The Fork",
//!   "start_node": "start",
//!   "nodes": {
//!     "start": {
//!       "text": "The path splits.",
//!       "options": [{ "text": "Go left", "next_node": "a" }]
//!     },
//!     "a": { "text": "The end.", "options": [] }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::StoryError;
use crate::node::{NodeId, StoryNode, StoryOption};
use crate::story::Story;

/// A complete story as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDefinition {
    pub title: String,
    pub start_node: NodeId,
    pub nodes: BTreeMap<NodeId, NodeDefinition>,
}

/// One node as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub text: String,
    /// May be left out for ending nodes.
    #[serde(default)]
    pub options: Vec<OptionDefinition>,
}

/// One choice as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDefinition {
    pub text: String,
    pub next_node: NodeId,
}

impl StoryDefinition {
    /// Parse a definition from JSON text.
    pub fn from_json(json: &str) -> Result<Self, StoryError> {
        serde_json::from_str(json).map_err(StoryError::malformed)
    }

    /// Parse a definition from an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, StoryError> {
        serde_json::from_value(value).map_err(StoryError::malformed)
    }

    /// Build the story graph. Choice targets are not checked.
    pub fn into_story(self) -> Story {
        self.nodes
            .into_iter()
            .fold(Story::new(self.title, self.start_node), |story, (id, node)| {
                let options = node
                    .options
                    .into_iter()
                    .map(|opt| StoryOption::new(opt.text, opt.next_node));
                story.with_node(StoryNode::new(id, node.text).with_options(options))
            })
    }
}
