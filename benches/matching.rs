//! Benchmarks for the per-event matching path
//!
//! Every key press runs three events through the engine, so lookup and
//! sequence bookkeeping sit on the input latency path.
//!
//! Run with: cargo bench matching

use std::time::Instant;

use spicykeys::keymap::{
    character_from_event, parse_combination, Callback, Document, EventKind, MatchEngine,
    Modifiers, RawKeyEvent,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn noop() -> Callback {
    Callback::new(|_, _| {})
}

/// Engine with `count` chords and a handful of sequences bound
fn engine_with_bindings(count: usize) -> MatchEngine {
    let mut engine = MatchEngine::new();
    let letters = "abcdefghijklmnopqrstuvwxyz";
    let prefixes = ["ctrl", "alt", "shift", "meta", "ctrl+shift", "ctrl+alt"];

    for i in 0..count {
        let prefix = prefixes[i % prefixes.len()];
        let letter = &letters[i % 26..i % 26 + 1];
        engine.bind(&format!("{prefix}+{letter}"), noop()).ok();
    }
    for seq in ["g i", "g o a", "g g", "c a t", "up up down down left right"] {
        engine.bind(seq, noop()).ok();
    }
    engine
}

fn press(ch: char, mods: Modifiers) -> [RawKeyEvent; 3] {
    let code = ch.to_ascii_uppercase() as u32;
    [
        RawKeyEvent::new(EventKind::Keydown, code).with_modifiers(mods),
        RawKeyEvent::new(EventKind::Keypress, ch as u32).with_modifiers(mods),
        RawKeyEvent::new(EventKind::Keyup, code).with_modifiers(mods),
    ]
}

// ============================================================================
// Parsing and normalization
// ============================================================================

#[divan::bench(args = ["a", "ctrl+shift+s", "command+option++", "f12"])]
fn parse(combo: &str) {
    divan::black_box(parse_combination(divan::black_box(combo), None).ok());
}

#[divan::bench]
fn normalize_events(bencher: divan::Bencher) {
    let events: Vec<RawKeyEvent> = "the quick brown fox"
        .chars()
        .flat_map(|ch| press(ch, Modifiers::NONE))
        .collect();

    bencher.bench(|| {
        for event in &events {
            divan::black_box(character_from_event(divan::black_box(event)));
        }
    });
}

// ============================================================================
// Full event handling
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn handle_chord(bencher: divan::Bencher, count: usize) {
    let doc = Document::new();
    let mut engine = engine_with_bindings(count);
    let events = press('s', Modifiers::CTRL);
    let now = Instant::now();

    bencher.bench_local(|| {
        for event in &events {
            divan::black_box(engine.handle_raw_event_at(&doc, event, now));
        }
    });
}

#[divan::bench(args = [10, 100, 1000])]
fn handle_sequence(bencher: divan::Bencher, count: usize) {
    let doc = Document::new();
    let mut engine = engine_with_bindings(count);
    let events: Vec<RawKeyEvent> = ['g', 'o', 'a']
        .into_iter()
        .flat_map(|ch| press(ch, Modifiers::NONE))
        .collect();
    let now = Instant::now();

    bencher.bench_local(|| {
        for event in &events {
            divan::black_box(engine.handle_raw_event_at(&doc, event, now));
        }
    });
}

#[divan::bench]
fn handle_unbound_typing(bencher: divan::Bencher) {
    let doc = Document::new();
    let mut engine = engine_with_bindings(100);
    let events: Vec<RawKeyEvent> = "lorem ipsum dolor"
        .chars()
        .flat_map(|ch| press(ch, Modifiers::NONE))
        .collect();
    let now = Instant::now();

    bencher.bench_local(|| {
        for event in &events {
            divan::black_box(engine.handle_raw_event_at(&doc, event, now));
        }
    });
}
