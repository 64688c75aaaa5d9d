//! # Story Graph
//!
//! The data side of the branching-narrative engine: story nodes, their
//! numbered choices, and the story graph that owns a traversal cursor.
//! This crate knows nothing about registries or save files.
//!
//! ## Core Components
//!
//! - **node**: Immutable narrative units and 1-based choice resolution
//! - **story**: The graph plus its cursor and the resumable play loop
//! - **definition**: The JSON story definition format
//! - **session**: The I/O seam the play loop talks to

pub mod definition;
pub mod error;
pub mod node;
pub mod session;
pub mod story;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use definition::*;
pub use error::*;
pub use node::*;
pub use session::*;
pub use story::*;
