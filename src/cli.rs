//! Command-line argument parsing for the replay tool
//!
//! Supports:
//! - Loading a keymap file (defaults to the user keymap)
//! - Replaying a recorded JSON event script against it
//! - Overriding the engine config file and debug flag

use clap::Parser;
use std::path::PathBuf;

/// Replay recorded key events against a keymap and print the actions that fire
#[derive(Parser, Debug)]
#[command(name = "spicykeys", version, about = "Replay key events against a keymap")]
pub struct CliArgs {
    /// JSON file with the key events to replay
    #[arg(value_name = "EVENTS")]
    pub events: PathBuf,

    /// Keymap YAML file (defaults to ~/.config/spicykeys/keymap.yaml)
    #[arg(short = 'k', long, value_name = "FILE")]
    pub keymap: Option<PathBuf>,

    /// Engine config YAML file (defaults to ~/.config/spicykeys/config.yaml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log every normalized event and fired handler
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl CliArgs {
    /// Keymap file to load, falling back to the user keymap
    pub fn keymap_path(&self) -> Result<PathBuf, String> {
        self.keymap
            .clone()
            .or_else(spicykeys::config_paths::keymap_file)
            .ok_or_else(|| "No keymap given and no config directory available".to_string())
    }
}
