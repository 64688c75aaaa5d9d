//! Story - a named node graph with a traversal cursor.
//!
//! The traversal is a small state machine over node ids plus a
//! "not started" state:
//! 1. **Reset**: `start` moves the cursor to the start node and clears history
//! 2. **Present**: the current node is shown and marked visited
//! 3. **Choose**: the reader picks a numbered option
//! 4. **Advance**: the cursor moves to the option's target
//! 5. **End**: a node without options finishes the session
//!
//! `play` never resets anything, so it continues from a restored cursor.

use std::collections::{HashMap, HashSet};

use crate::error::StoryError;
use crate::node::{NodeId, StoryNode};
use crate::session::{ChoiceInput, SessionIo};

/// Result of one tick of the play loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The cursor is unset; nothing to play.
    NotStarted,
    /// The reader's answer was rejected and reported; the node is shown again.
    Stayed,
    /// The cursor moved along a choice.
    Advanced { from: NodeId, to: NodeId },
    /// The current node is terminal and the session is over.
    Finished(NodeId),
}

impl StepOutcome {
    /// Whether the play loop should stop after this outcome.
    pub fn is_final(&self) -> bool {
        matches!(self, StepOutcome::NotStarted | StepOutcome::Finished(_))
    }
}

/// A branching story and the live state of one reader's way through it.
#[derive(Debug, Clone)]
pub struct Story {
    title: String,
    start_node: NodeId,
    nodes: HashMap<NodeId, StoryNode>,

    /// Node the reader is at. `None` until started or restored.
    current_node: Option<NodeId>,

    /// Every node presented this session.
    visited: HashSet<NodeId>,
}

impl Story {
    /// Create an empty story that will begin at `start_node`.
    pub fn new(title: impl Into<String>, start_node: impl Into<NodeId>) -> Self {
        Self {
            title: title.into(),
            start_node: start_node.into(),
            nodes: HashMap::new(),
            current_node: None,
            visited: HashSet::new(),
        }
    }

    /// Add a node, builder style.
    pub fn with_node(mut self, node: StoryNode) -> Self {
        self.add_node(node);
        self
    }

    /// Add a node, replacing any node with the same id.
    pub fn add_node(&mut self, node: StoryNode) {
        self.nodes.insert(node.id().clone(), node);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_node(&self) -> &NodeId {
        &self.start_node
    }

    pub fn node(&self, id: &NodeId) -> Option<&StoryNode> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn current_node(&self) -> Option<&NodeId> {
        self.current_node.as_ref()
    }

    pub fn visited(&self) -> &HashSet<NodeId> {
        &self.visited
    }

    /// True when the cursor rests on an ending node.
    pub fn is_finished(&self) -> bool {
        self.current_node
            .as_ref()
            .and_then(|id| self.nodes.get(id))
            .is_some_and(StoryNode::is_terminal)
    }

    /// Put the cursor back on the start node and forget visited nodes.
    pub fn reset(&mut self) {
        self.current_node = Some(self.start_node.clone());
        self.visited.clear();
    }

    /// Overwrite the cursor and visited set, e.g. from a saved snapshot.
    ///
    /// The cursor is not checked here; a bad one surfaces as
    /// [`StoryError::UnknownNode`] on the next step.
    pub fn restore(
        &mut self,
        current_node: Option<NodeId>,
        visited: impl IntoIterator<Item = NodeId>,
    ) {
        self.current_node = current_node;
        self.visited = visited.into_iter().collect();
    }

    /// Reset and play from the start node.
    pub fn start<I: SessionIo + ?Sized>(&mut self, io: &mut I) -> Result<StepOutcome, StoryError> {
        self.reset();
        self.play(io)
    }

    /// Run the loop from wherever the cursor is until the story ends.
    pub fn play<I: SessionIo + ?Sized>(&mut self, io: &mut I) -> Result<StepOutcome, StoryError> {
        loop {
            let outcome = self.step(io)?;
            if outcome.is_final() {
                return Ok(outcome);
            }
        }
    }

    /// Run a single tick of the play loop.
    pub fn step<I: SessionIo + ?Sized>(&mut self, io: &mut I) -> Result<StepOutcome, StoryError> {
        let Some(current) = self.current_node.clone() else {
            return Ok(StepOutcome::NotStarted);
        };

        let Some(node) = self.nodes.get(&current) else {
            tracing::warn!(story = %self.title, node = %current, "cursor points at a missing node");
            return Err(StoryError::unknown_node(current));
        };

        self.visited.insert(current.clone());
        io.present(node)?;

        if node.is_terminal() {
            tracing::debug!(story = %self.title, node = %current, "reached an ending");
            io.announce_end(node)?;
            return Ok(StepOutcome::Finished(current));
        }

        let index = match io.read_choice(node)? {
            ChoiceInput::Number(index) => index,
            ChoiceInput::NotANumber(raw) => {
                io.report(&StoryError::parse(raw))?;
                return Ok(StepOutcome::Stayed);
            }
        };

        match node.resolve_choice(index) {
            Ok(target) => {
                let target = target.clone();
                tracing::debug!(story = %self.title, from = %current, to = %target, "advanced");
                self.current_node = Some(target.clone());
                Ok(StepOutcome::Advanced {
                    from: current,
                    to: target,
                })
            }
            Err(err) => {
                io.report(&err)?;
                Ok(StepOutcome::Stayed)
            }
        }
    }

    /// Choice targets that name no node, as `(node, target)` pairs sorted by node id.
    pub fn dangling_targets(&self) -> Vec<(&NodeId, &NodeId)> {
        let mut dangling: Vec<_> = self
            .nodes
            .values()
            .flat_map(|node| node.options().map(move |(_, opt)| (node.id(), &opt.target)))
            .filter(|(_, target)| !self.nodes.contains_key(*target))
            .collect();
        dangling.sort();
        dangling
    }

    /// Check that the start node and every choice target exist.
    pub fn validate(&self) -> Result<(), StoryError> {
        let mut problems = Vec::new();
        if !self.nodes.contains_key(&self.start_node) {
            problems.push(format!("start node '{}' does not exist", self.start_node));
        }
        for (node, target) in self.dangling_targets() {
            problems.push(format!("node '{}' points at missing node '{}'", node, target));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(StoryError::malformed(format!(
                "story '{}': {}",
                self.title,
                problems.join("; ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fork_story, ScriptedSession};

    #[test]
    fn test_new_story_not_started() {
        let mut story = fork_story();
        let mut io = ScriptedSession::new(Vec::<&str>::new());

        assert!(story.current_node().is_none());
        assert_eq!(story.play(&mut io).unwrap(), StepOutcome::NotStarted);
        assert!(io.presented.is_empty());
    }

    #[test]
    fn test_choose_then_finish() {
        let mut story = fork_story();
        story.reset();
        let mut io = ScriptedSession::new(["1"]);

        let outcome = story.step(&mut io).unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Advanced {
                from: NodeId::from("start"),
                to: NodeId::from("a"),
            }
        );
        assert_eq!(story.current_node().unwrap().as_str(), "a");

        // The ending is announced without another prompt.
        let outcome = story.step(&mut io).unwrap();
        assert_eq!(outcome, StepOutcome::Finished(NodeId::from("a")));
        assert_eq!(io.prompts, 1);
        assert_eq!(io.endings, vec![NodeId::from("a")]);
        assert!(story.is_finished());
    }

    #[test]
    fn test_start_plays_to_the_end() {
        let mut story = fork_story();
        let mut io = ScriptedSession::new(["2"]);

        let outcome = story.start(&mut io).unwrap();

        assert_eq!(outcome, StepOutcome::Finished(NodeId::from("b")));
        assert_eq!(io.presented, vec![NodeId::from("start"), NodeId::from("b")]);
        let expected: HashSet<_> = [NodeId::from("start"), NodeId::from("b")].into();
        assert_eq!(story.visited(), &expected);
    }

    #[test]
    fn test_invalid_input_stays_on_node() {
        let mut story = fork_story();
        let mut io = ScriptedSession::new(["zero", "0", "-3", "7", "1"]);

        let outcome = story.start(&mut io).unwrap();

        assert_eq!(outcome, StepOutcome::Finished(NodeId::from("a")));
        assert_eq!(io.reports.len(), 4);
        assert!(matches!(io.reports[0], StoryError::ParseError { .. }));
        assert!(io.reports[1..]
            .iter()
            .all(|e| matches!(e, StoryError::InvalidChoice { available: 2, .. })));
        // The start node is shown once per attempt.
        assert_eq!(
            io.presented.iter().filter(|id| id.as_str() == "start").count(),
            5
        );
    }

    #[test]
    fn test_start_resets_history() {
        let mut story = fork_story();
        story.start(&mut ScriptedSession::new(["1"])).unwrap();
        assert!(story.visited().contains(&NodeId::from("a")));

        story.start(&mut ScriptedSession::new(["2"])).unwrap();
        assert!(!story.visited().contains(&NodeId::from("a")));
        assert_eq!(story.current_node().unwrap().as_str(), "b");
    }

    #[test]
    fn test_play_resumes_restored_cursor() {
        let mut story = fork_story();
        story.restore(Some(NodeId::from("b")), [NodeId::from("start")]);
        let mut io = ScriptedSession::new(Vec::<&str>::new());

        let outcome = story.play(&mut io).unwrap();

        assert_eq!(outcome, StepOutcome::Finished(NodeId::from("b")));
        assert_eq!(io.presented, vec![NodeId::from("b")]);
        assert_eq!(story.visited().len(), 2);
    }

    #[test]
    fn test_unknown_node_is_fatal() {
        let mut story = fork_story();
        story.restore(Some(NodeId::from("nowhere")), Vec::new());
        let mut io = ScriptedSession::new(["1"]);

        let err = story.play(&mut io).unwrap_err();
        assert!(matches!(err, StoryError::UnknownNode { ref id } if id.as_str() == "nowhere"));
        assert!(io.presented.is_empty());
    }

    #[test]
    fn test_dangling_target_fails_at_traversal() {
        let mut story = Story::new("Broken", "start")
            .with_node(StoryNode::new("start", "Go?").with_option("Yes", "missing"));
        let mut io = ScriptedSession::new(["1"]);

        let err = story.start(&mut io).unwrap_err();
        assert!(matches!(err, StoryError::UnknownNode { .. }));
        assert_eq!(story.current_node().unwrap().as_str(), "missing");
    }

    #[test]
    fn test_exhausted_input_is_fatal() {
        let mut story = fork_story();
        let mut io = ScriptedSession::new(Vec::<&str>::new());

        let err = story.start(&mut io).unwrap_err();
        assert!(matches!(err, StoryError::Input(_)));
    }

    #[test]
    fn test_validate() {
        assert!(fork_story().validate().is_ok());

        let broken = Story::new("Broken", "begin")
            .with_node(StoryNode::new("start", "Go?").with_option("Yes", "missing"));
        assert_eq!(broken.dangling_targets().len(), 1);

        let err = broken.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("start node 'begin'"));
        assert!(message.contains("missing node 'missing'"));
    }
}
