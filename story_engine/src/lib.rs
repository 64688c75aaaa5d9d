//! # Story Engine
//!
//! Runs branching stories built with `story_graph`: keeps a registry of
//! stories, tracks which one the reader is playing, and saves or resumes the
//! reader's place in it.
//!
//! ## Core Components
//!
//! - **manager**: Story registry, selection, and save/load
//! - **snapshot**: The save-file format and the single save slot
//! - **config**: TOML configuration
//! - **terminal**: Line-based session I/O and the main menu
//! - **logging**: `tracing` subscriber setup
//!
//! ## Known Limitations
//!
//! - Saves overwrite the file in place; a crash mid-write can corrupt it.
//! - Progress made since the last save is lost when the process exits,
//!   unless autosave is on.

pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod session;
pub mod snapshot;
pub mod terminal;

pub use config::*;
pub use error::*;
pub use manager::*;
pub use session::*;
pub use snapshot::*;
pub use terminal::*;

/// Story definition bundled with the `story` binary, registered when no
/// other stories are configured. Lives in `stories/mysterious_cave.json`.
pub const SAMPLE_STORY: &str = include_str!("../stories/mysterious_cave.json");
