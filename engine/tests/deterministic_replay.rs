use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use pinata_core::{Command, ConfigFile, Event};
use pinata_engine::{self as engine, query, Engine};

#[test]
fn deterministic_replay_produces_identical_event_log() {
    let first = replay(scripted_commands(), 0x0bad_cafe);
    let second = replay(scripted_commands(), 0x0bad_cafe);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn replay_opens_every_target_that_was_clicked_cleanly() {
    let outcome = replay(scripted_commands(), 7);

    assert!(outcome.sequence >= 9, "reached piñata #{}", outcome.sequence);
    let opened = outcome.sequence - 1;
    assert_eq!(outcome.score, opened * (opened + 1) / 2);
    assert!(outcome
        .events
        .iter()
        .any(|event| matches!(event, Event::CooldownChanged { active: true, .. })));
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    score: u32,
    sequence: u32,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

fn replay(commands: Vec<Command>, seed: u64) -> ReplayOutcome {
    let config = ConfigFile {
        starting_bombs: 2,
        starting_criticals: 2,
        ..ConfigFile::default()
    }
    .validate()
    .expect("valid configuration");
    let mut engine = Engine::seeded(config, seed);
    let mut events = Vec::new();
    engine.announce(&mut events);

    for command in commands {
        engine::apply(&mut engine, command, &mut events);
    }

    ReplayOutcome {
        score: query::score(&engine).score(),
        sequence: query::target(&engine).sequence(),
        events,
    }
}

/// Clicks each piñata exactly, waits out its grace window, and mixes in
/// power-ups and one deliberate overshoot.
fn scripted_commands() -> Vec<Command> {
    const FRAME: Duration = Duration::from_millis(100);

    let mut commands = Vec::new();
    let mut now = Duration::ZERO;
    let advance = |commands: &mut Vec<Command>, frames: u32| {
        for _ in 0..frames {
            commands.push(Command::Tick { dt: FRAME });
        }
        FRAME * frames
    };

    for required in 1..=6u32 {
        for _ in 0..required {
            commands.push(Command::Click { at: now });
            now += advance(&mut commands, 1);
        }
        now += advance(&mut commands, 11);
    }

    // Overshoot piñata #7, sit out the cooldown, then bomb it open.
    for _ in 0..8 {
        commands.push(Command::Click { at: now });
        now += advance(&mut commands, 1);
    }
    now += advance(&mut commands, 31);
    commands.push(Command::UseBomb);

    commands.push(Command::UseCritical);
    commands.push(Command::Click { at: now });
    commands.push(Command::UseBomb);
    let _ = advance(&mut commands, 5);

    commands
}
