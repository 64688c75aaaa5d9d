//! Shared test helpers.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so downstream
//! crates can drive the play loop from their own tests.

use std::collections::VecDeque;

use crate::error::StoryError;
use crate::node::{NodeId, StoryNode};
use crate::session::{ChoiceInput, SessionIo};
use crate::story::Story;

/// A `SessionIo` that answers prompts from a fixed script and records
/// everything the play loop tells it.
#[derive(Debug, Default)]
pub struct ScriptedSession {
    answers: VecDeque<String>,
    /// Ids of nodes in the order they were presented.
    pub presented: Vec<NodeId>,
    /// Recoverable errors reported back to the reader.
    pub reports: Vec<StoryError>,
    /// Ending nodes announced.
    pub endings: Vec<NodeId>,
    /// Number of choice prompts answered.
    pub prompts: usize,
}

impl ScriptedSession {
    pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl SessionIo for ScriptedSession {
    fn present(&mut self, node: &StoryNode) -> std::io::Result<()> {
        self.presented.push(node.id().clone());
        Ok(())
    }

    /// Runs out with `UnexpectedEof`, like a closed stdin.
    fn read_choice(&mut self, _node: &StoryNode) -> std::io::Result<ChoiceInput> {
        let answer = self.answers.pop_front().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "script exhausted")
        })?;
        self.prompts += 1;
        Ok(ChoiceInput::parse(&answer))
    }

    fn report(&mut self, error: &StoryError) -> std::io::Result<()> {
        // StoryError holds an io::Error and cannot be cloned; keep a copy of the shape.
        let copy = match error {
            StoryError::InvalidChoice { index, available } => {
                StoryError::invalid_choice(*index, *available)
            }
            StoryError::ParseError { input } => StoryError::parse(input.clone()),
            other => StoryError::malformed(other.to_string()),
        };
        self.reports.push(copy);
        Ok(())
    }

    fn announce_end(&mut self, node: &StoryNode) -> std::io::Result<()> {
        self.endings.push(node.id().clone());
        Ok(())
    }
}

/// `start -> {a, b}` with both branches terminal.
pub fn fork_story() -> Story {
    Story::new("The Fork", "start")
        .with_node(
            StoryNode::new("start", "The path splits.")
                .with_option("Take the left path", "a")
                .with_option("Take the right path", "b"),
        )
        .with_node(StoryNode::new("a", "A quiet glade. You rest."))
        .with_node(StoryNode::new("b", "A cliff edge. You turn home."))
}

/// A second small story for registry tests.
pub fn lantern_story() -> Story {
    Story::new("The Lantern", "porch")
        .with_node(
            StoryNode::new("porch", "A lantern flickers on the porch.")
                .with_option("Light it", "lit")
                .with_option("Leave it", "dark"),
        )
        .with_node(
            StoryNode::new("lit", "The yard fills with light.").with_option("Walk out", "yard"),
        )
        .with_node(StoryNode::new("yard", "You find the lost key."))
        .with_node(StoryNode::new("dark", "You go back to bed."))
}
