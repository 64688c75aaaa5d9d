//! Interactive terminal player for branching stories.
//!
//! Runs the bundled sample story when started without `--stories` or
//! configured `story_dirs`:
//!
//! ```bash
//! story
//! story --stories my_stories/ --autosave
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

use story_engine::{logging, EngineConfig, Menu, StoryManager, Terminal, SAMPLE_STORY};

#[derive(Parser)]
#[command(name = "story", version, about = "Play branching stories in the terminal")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save file, overriding the configured one.
    #[arg(short, long)]
    save_path: Option<PathBuf>,

    /// Story definition files or directories to load, in addition to the
    /// configured story directories. The bundled sample is used when none load.
    #[arg(long = "stories", value_name = "PATH")]
    stories: Vec<PathBuf>,

    /// Save after every choice.
    #[arg(long)]
    autosave: bool,

    /// Reject stories whose choices point at missing nodes.
    #[arg(long)]
    strict: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(save_path) = cli.save_path {
        config.save_path = save_path;
    }
    config.autosave |= cli.autosave;
    config.validate_targets |= cli.strict;

    logging::init(&config.log_filter);

    let mut manager = StoryManager::from_config(&config);
    for dir in &config.story_dirs {
        manager
            .load_story_dir(dir)
            .with_context(|| format!("load stories from {}", dir.display()))?;
    }
    for path in &cli.stories {
        let loaded = if path.is_dir() {
            manager.load_story_dir(path)
        } else {
            manager.register_file(path).map(|title| vec![title])
        };
        loaded.with_context(|| format!("load stories from {}", path.display()))?;
    }

    if manager.story_count() == 0 {
        tracing::info!("no stories configured; loading the bundled sample");
        manager
            .register_json(SAMPLE_STORY)
            .context("load bundled sample story")?;
    }

    let stdin = io::stdin();
    let mut menu = Menu::new(&mut manager, Terminal::new(stdin.lock(), io::stdout()));
    menu.run().context("terminal I/O failed")
}
