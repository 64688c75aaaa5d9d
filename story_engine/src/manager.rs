//! Story Manager - the registry of stories, the active selection, and
//! save/resume of traversal state.

use std::fs;
use std::path::{Path, PathBuf};

use story_graph::{SessionIo, StepOutcome, Story, StoryDefinition};

use crate::config::EngineConfig;
use crate::error::ManagerError;
use crate::session::SessionId;
use crate::snapshot::{SaveSlot, Snapshot};

/// Registry of stories plus the one the reader is playing.
///
/// The manager is an explicit context object: the front end owns one and
/// passes it around, there is no global instance.
#[derive(Debug)]
pub struct StoryManager {
    /// Stories in registration order. Titles are unique.
    stories: Vec<Story>,

    /// Title of the active story. Held as a key so re-registering a title
    /// keeps the selection pointed at the new story.
    active: Option<String>,

    save_slot: SaveSlot,
    autosave: bool,
    validate_targets: bool,
}

impl StoryManager {
    /// Create an empty manager saving to `save_path`.
    pub fn new(save_path: impl Into<PathBuf>) -> Self {
        Self {
            stories: Vec::new(),
            active: None,
            save_slot: SaveSlot::new(save_path),
            autosave: false,
            validate_targets: false,
        }
    }

    /// Create an empty manager from configuration. Story directories are not
    /// loaded here; see [`StoryManager::load_story_dir`].
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.save_path)
            .with_autosave(config.autosave)
            .with_target_validation(config.validate_targets)
    }

    /// Save after every choice that moves the cursor.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Check start nodes and choice targets when stories are registered.
    pub fn with_target_validation(mut self, validate: bool) -> Self {
        self.validate_targets = validate;
        self
    }

    pub fn save_path(&self) -> &Path {
        self.save_slot.path()
    }

    /// Whether a save file exists.
    pub fn has_save(&self) -> bool {
        self.save_slot.exists()
    }

    /// Register a story, replacing any story with the same title in place.
    pub fn register_story(&mut self, definition: StoryDefinition) -> Result<(), ManagerError> {
        let story = definition.into_story();
        if self.validate_targets {
            story.validate()?;
        }

        tracing::debug!(title = %story.title(), nodes = story.node_count(), "registering story");
        match self.position(story.title()) {
            Some(index) => {
                tracing::info!(title = %story.title(), "replacing story with the same title");
                self.stories[index] = story;
            }
            None => self.stories.push(story),
        }
        Ok(())
    }

    /// Parse a JSON story definition and register it. Returns the title.
    pub fn register_json(&mut self, json: &str) -> Result<String, ManagerError> {
        let definition = StoryDefinition::from_json(json)?;
        let title = definition.title.clone();
        self.register_story(definition)?;
        Ok(title)
    }

    /// Read a JSON story definition from a file and register it.
    pub fn register_file(&mut self, path: impl AsRef<Path>) -> Result<String, ManagerError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ManagerError::StoryFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.register_json(&json)
    }

    /// Register every `*.json` file in a directory, in file-name order.
    ///
    /// Stops at the first file that fails. Returns the registered titles.
    pub fn load_story_dir(&mut self, dir: impl AsRef<Path>) -> Result<Vec<String>, ManagerError> {
        let dir = dir.as_ref();
        let read_error = |source: std::io::Error| ManagerError::StoryFile {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        let mut titles = Vec::with_capacity(files.len());
        for file in files {
            titles.push(self.register_file(&file)?);
        }
        tracing::info!(dir = %dir.display(), count = titles.len(), "loaded story directory");
        Ok(titles)
    }

    /// Titles in registration order. The iterator can be cloned to restart it.
    pub fn list_stories(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.stories.iter().map(Story::title)
    }

    pub fn story_count(&self) -> usize {
        self.stories.len()
    }

    pub fn story(&self, title: &str) -> Option<&Story> {
        self.stories.iter().find(|story| story.title() == title)
    }

    fn story_mut(&mut self, title: &str) -> Option<&mut Story> {
        self.stories.iter_mut().find(|story| story.title() == title)
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.stories.iter().position(|story| story.title() == title)
    }

    /// Make the `index`th story (1-based, as listed) active.
    ///
    /// The story's cursor is left as it is.
    pub fn select_story(&mut self, index: i64) -> Result<&Story, ManagerError> {
        let count = self.stories.len();
        let position = usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .filter(|&i| i < count)
            .ok_or(ManagerError::OutOfRange { index, count })?;

        let story = &self.stories[position];
        tracing::debug!(title = %story.title(), "selected story");
        self.active = Some(story.title().to_owned());
        Ok(story)
    }

    pub fn active_title(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_story(&self) -> Option<&Story> {
        self.active.as_deref().and_then(|title| self.story(title))
    }

    pub fn active_story_mut(&mut self) -> Option<&mut Story> {
        let title = self.active.clone()?;
        self.story_mut(&title)
    }

    /// Write the active story's cursor and visited set to the save file.
    pub fn save_progress(&self) -> Result<(), ManagerError> {
        let story = self.active_story().ok_or(ManagerError::NoActiveStory)?;
        let snapshot = Snapshot::capture(story);
        self.save_slot.write(&snapshot)?;

        tracing::info!(
            title = %snapshot.story_title,
            path = %self.save_slot.path().display(),
            "saved progress"
        );
        Ok(())
    }

    /// Restore the saved snapshot into its story and make that story active.
    ///
    /// The restored cursor is not checked against the story's nodes; a bad
    /// one fails on the next play step.
    pub fn load_progress(&mut self) -> Result<&Story, ManagerError> {
        if !self.save_slot.exists() {
            return Err(ManagerError::NoSaveFile {
                path: self.save_slot.path().to_path_buf(),
            });
        }
        let snapshot = self.save_slot.read()?;
        let title = snapshot.story_title.clone();

        let story = self.story_mut(&title).ok_or_else(|| {
            tracing::warn!(title = %title, "save file names an unregistered story");
            ManagerError::UnknownStory {
                title: title.clone(),
            }
        })?;
        snapshot.restore_into(story);

        tracing::info!(
            title = %title,
            node = ?story.current_node().map(|id| id.as_str()),
            "loaded progress"
        );
        self.active = Some(title);
        self.active_story().ok_or(ManagerError::NoActiveStory)
    }

    /// Reset the active story and play it from its start node.
    pub fn start_active<I: SessionIo + ?Sized>(
        &mut self,
        io: &mut I,
    ) -> Result<StepOutcome, ManagerError> {
        self.active_story_mut()
            .ok_or(ManagerError::NoActiveStory)?
            .reset();
        self.play_active(io)
    }

    /// Play the active story from its current cursor until it ends.
    ///
    /// With autosave on, progress is written after every step that moves
    /// the cursor.
    pub fn play_active<I: SessionIo + ?Sized>(
        &mut self,
        io: &mut I,
    ) -> Result<StepOutcome, ManagerError> {
        let title = self.active.clone().ok_or(ManagerError::NoActiveStory)?;
        let session = SessionId::new();
        let span = tracing::info_span!("session", id = %session, story = %title);
        let _enter = span.enter();

        loop {
            let story = self.story_mut(&title).ok_or(ManagerError::NoActiveStory)?;
            let outcome = story.step(io).inspect_err(|err| {
                tracing::warn!(error = %err, "play session aborted");
            })?;

            if self.autosave && matches!(outcome, StepOutcome::Advanced { .. }) {
                self.save_progress()?;
            }
            if outcome.is_final() {
                tracing::debug!(?outcome, "play session ended");
                return Ok(outcome);
            }
        }
    }
}

impl Default for StoryManager {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
