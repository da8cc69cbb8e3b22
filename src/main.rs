//! Replay a recorded key event script against a keymap
//!
//! ```text
//! spicykeys events.json --keymap keymap.yaml
//! ```
//!
//! The script is a JSON array of events. Each entry carries the raw event
//! fields plus an optional `delay_ms` (time since the previous event) and
//! `editable` (dispatch the event on a text input instead of the body):
//!
//! ```json
//! [
//!   { "kind": "keypress", "which": 103 },
//!   { "kind": "keypress", "which": 105, "delay_ms": 300 }
//! ]
//! ```
//!
//! Each fired action is printed on its own line as `<action>\t<combo>`.

mod cli;

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use cli::CliArgs;
use spicykeys::config::EngineConfig;
use spicykeys::keymap::{load_keymap_file, ActionHandlers, Callback, Document, MatchEngine, RawKeyEvent};

/// One entry of an event script
#[derive(Debug, Deserialize)]
struct ScriptedEvent {
    #[serde(flatten)]
    event: RawKeyEvent,
    /// Milliseconds elapsed since the previous event
    #[serde(default)]
    delay_ms: u64,
    /// Dispatch on a text input, where callbacks are suppressed
    #[serde(default)]
    editable: bool,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::load());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    EngineConfig::from_yaml(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

fn load_script(path: &Path) -> Result<Vec<ScriptedEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event script {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse event script {}", path.display()))
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    spicykeys::tracing::init(args.debug);

    let mut config = load_config(args.config.as_deref())?;
    config.debug |= args.debug;

    let keymap_path = args.keymap_path().map_err(anyhow::Error::msg)?;
    let keymap = load_keymap_file(&keymap_path)
        .with_context(|| format!("Failed to load keymap {}", keymap_path.display()))?;

    let mut handlers = ActionHandlers::new();
    for (action, _) in keymap.iter() {
        let name = action.to_string();
        handlers.insert(
            action,
            Callback::new(move |_, combo| println!("{}\t{}", name, combo)),
        );
    }

    let mut engine = MatchEngine::with_config(config);
    engine.register(&keymap, &handlers)?;
    tracing::info!(
        bindings = engine.bindings().len(),
        "Loaded keymap from {}",
        keymap_path.display()
    );

    let script = load_script(&args.events)?;

    let mut doc = Document::new();
    let body = doc.body();
    let input = doc.create_element(body, "input");

    let start = Instant::now();
    let mut now = start;
    let mut fired = 0;
    for entry in script {
        now += Duration::from_millis(entry.delay_ms);
        let target = if entry.editable { input } else { body };
        let event = entry.event.with_target(target);
        fired += engine.handle_raw_event_at(&doc, &event, now);
    }
    // Let any trailing sequence window lapse
    if let Some(deadline) = engine.next_deadline() {
        engine.poll(deadline);
    }

    tracing::info!(fired, elapsed_ms = (now - start).as_millis() as u64, "Replay finished");
    Ok(())
}
