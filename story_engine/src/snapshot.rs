//! Snapshots of a story's traversal state and the single save slot they live in.
//!
//! The save file holds one session:
//!
//! ```json
//! { "story_title": "The Fork", "current_node": "a", "visited_nodes": ["start", "a"] }
//! ```
//!
//! Writes overwrite the file in place and are not atomic; a crash mid-write
//! can leave a corrupt save behind, which the next load reports as
//! [`ManagerError::CorruptSave`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use story_graph::{NodeId, Story};

use crate::error::ManagerError;

/// Default file name of the save slot.
pub const DEFAULT_SAVE_FILE: &str = "story_save.json";

/// A point-in-time copy of one story's cursor. The graph is not included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub story_title: String,

    /// `null` when the story had not been started.
    #[serde(deserialize_with = "Option::deserialize")]
    pub current_node: Option<NodeId>,

    /// Order carries no meaning.
    pub visited_nodes: Vec<NodeId>,
}

impl Snapshot {
    /// Copy the cursor and visited set out of a story.
    ///
    /// Visited ids are sorted so repeated saves of the same state write the
    /// same bytes.
    pub fn capture(story: &Story) -> Self {
        let mut visited_nodes: Vec<NodeId> = story.visited().iter().cloned().collect();
        visited_nodes.sort();
        Self {
            story_title: story.title().to_owned(),
            current_node: story.current_node().cloned(),
            visited_nodes,
        }
    }

    /// Overwrite a story's cursor and visited set with this snapshot.
    pub fn restore_into(self, story: &mut Story) {
        story.restore(self.current_node, self.visited_nodes);
    }
}

/// The file a [`Snapshot`] is saved to.
#[derive(Debug, Clone)]
pub struct SaveSlot {
    path: PathBuf,
}

impl SaveSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the snapshot as pretty JSON, replacing any previous save.
    pub fn write(&self, snapshot: &Snapshot) -> Result<(), ManagerError> {
        let mut payload = serde_json::to_string_pretty(snapshot)
            .map_err(|err| ManagerError::persistence(&self.path, err.into()))?;
        payload.push('\n');
        fs::write(&self.path, payload).map_err(|err| ManagerError::persistence(&self.path, err))
    }

    /// Read the saved snapshot.
    pub fn read(&self) -> Result<Snapshot, ManagerError> {
        let raw = fs::read_to_string(&self.path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ManagerError::NoSaveFile {
                path: self.path.clone(),
            },
            _ => ManagerError::persistence(&self.path, err),
        })?;
        serde_json::from_str(&raw).map_err(|err| ManagerError::corrupt(&self.path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_graph::test_utils::{fork_story, ScriptedSession};
    use tempfile::TempDir;

    fn slot_in(dir: &TempDir) -> SaveSlot {
        SaveSlot::new(dir.path().join("save.json"))
    }

    #[test]
    fn test_capture_unstarted_story() {
        let snapshot = Snapshot::capture(&fork_story());
        assert_eq!(snapshot.story_title, "The Fork");
        assert!(snapshot.current_node.is_none());
        assert!(snapshot.visited_nodes.is_empty());
    }

    #[test]
    fn test_write_and_read() {
        let dir = TempDir::new().unwrap();
        let slot = slot_in(&dir);

        let mut story = fork_story();
        story.start(&mut ScriptedSession::new(["2"])).unwrap();
        let snapshot = Snapshot::capture(&story);

        slot.write(&snapshot).unwrap();
        assert!(slot.exists());
        assert_eq!(slot.read().unwrap(), snapshot);

        let raw = fs::read_to_string(slot.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["story_title"], "The Fork");
        assert_eq!(value["current_node"], "b");
        assert_eq!(value["visited_nodes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = slot_in(&dir).read().unwrap_err();
        assert!(matches!(err, ManagerError::NoSaveFile { .. }));
    }

    #[test]
    fn test_read_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let slot = slot_in(&dir);

        fs::write(slot.path(), "{ not json").unwrap();
        assert!(matches!(slot.read().unwrap_err(), ManagerError::CorruptSave { .. }));

        // Every field is required, including a null cursor.
        fs::write(slot.path(), r#"{"story_title": "The Fork", "visited_nodes": []}"#).unwrap();
        assert!(matches!(slot.read().unwrap_err(), ManagerError::CorruptSave { .. }));

        fs::write(slot.path(), r#"{"story_title": "The Fork", "current_node": "a"}"#).unwrap();
        assert!(matches!(slot.read().unwrap_err(), ManagerError::CorruptSave { .. }));
    }

    #[test]
    fn test_null_cursor_round_trips() {
        let dir = TempDir::new().unwrap();
        let slot = slot_in(&dir);

        fs::write(
            slot.path(),
            r#"{"story_title": "The Fork", "current_node": null, "visited_nodes": []}"#,
        )
        .unwrap();
        assert!(slot.read().unwrap().current_node.is_none());
    }

    #[test]
    fn test_write_to_missing_directory() {
        let dir = TempDir::new().unwrap();
        let slot = SaveSlot::new(dir.path().join("no/such/dir/save.json"));

        let err = slot.write(&Snapshot::capture(&fork_story())).unwrap_err();
        assert!(matches!(err, ManagerError::Persistence { .. }));
    }
}
