//! Diagnostic tracing for the engine.
//!
//! Story text and prompts go to stdout through the terminal front end.
//! Diagnostics go to stderr and are controlled by `RUST_LOG`, falling back
//! to the configured filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// # Example
/// ```bash
/// RUST_LOG=story_engine=debug,story_graph=debug story --stories stories/
/// ```
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
