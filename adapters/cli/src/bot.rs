use std::time::Duration;

use pinata_core::{Command, EnginePhase};
use pinata_engine::{query, Engine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Piñatas at least this large are worth a bomb.
const BOMB_THRESHOLD: u32 = 6;
/// Piñatas at least this large are worth a critical.
const CRITICAL_THRESHOLD: u32 = 3;

/// Scripted player that clicks at a steady cadence.
#[derive(Debug)]
pub(crate) struct Bot {
    rng: ChaCha8Rng,
    cadence: Duration,
    misclick_chance: f32,
    next_click: Duration,
    seen_sequence: u32,
    overshoot_planned: bool,
}

impl Bot {
    /// Creates a bot whose misclicks are reproducible from `seed`.
    pub(crate) fn new(seed: u64, cadence: Duration, misclick_chance: f32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            cadence,
            misclick_chance,
            next_click: Duration::ZERO,
            seen_sequence: 0,
            overshoot_planned: false,
        }
    }

    /// Picks at most one command for the frame starting at `now`.
    pub(crate) fn decide<R>(&mut self, engine: &Engine<R>, now: Duration) -> Option<Command> {
        let target = query::target(engine);
        if target.sequence() != self.seen_sequence {
            self.seen_sequence = target.sequence();
            self.overshoot_planned = self.rng.gen::<f32>() < self.misclick_chance;
        }

        let score = query::score(engine);
        match query::phase(engine) {
            EnginePhase::Cooldown => None,
            EnginePhase::Grace => {
                if !self.overshoot_planned {
                    return None;
                }
                let command = self.click(now);
                if command.is_some() {
                    self.overshoot_planned = false;
                }
                command
            }
            EnginePhase::Active if target.clicks_landed() == 0 => {
                if score.bomb_count() > 0 && target.clicks_required() >= BOMB_THRESHOLD {
                    Some(Command::UseBomb)
                } else if score.critical_count() > 0
                    && score.pending_critical_bonus() == 0
                    && target.clicks_required() >= CRITICAL_THRESHOLD
                {
                    Some(Command::UseCritical)
                } else {
                    self.click(now)
                }
            }
            EnginePhase::Active => self.click(now),
        }
    }

    fn click(&mut self, now: Duration) -> Option<Command> {
        if now < self.next_click {
            return None;
        }
        self.next_click = now + self.cadence;
        Some(Command::Click { at: now })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinata_core::{ConfigFile, EngineConfig, Event};
    use pinata_engine as engine;

    const FRAME: Duration = Duration::from_millis(50);

    fn play(config: EngineConfig, misclick_chance: f32, frames: u32) -> (Engine, Vec<Event>) {
        let mut engine = Engine::seeded(config, 11);
        let mut bot = Bot::new(11, Duration::from_millis(150), misclick_chance);
        let mut events = Vec::new();
        let mut now = Duration::ZERO;

        for _ in 0..frames {
            if let Some(command) = bot.decide(&engine, now) {
                engine::apply(&mut engine, command, &mut events);
            }
            now += FRAME;
            engine::apply(&mut engine, Command::Tick { dt: FRAME }, &mut events);
        }
        (engine, events)
    }

    #[test]
    fn careful_bot_never_overshoots() {
        let config = ConfigFile {
            starting_bombs: 2,
            starting_criticals: 2,
            ..ConfigFile::default()
        }
        .validate()
        .expect("valid configuration");

        let (engine, events) = play(config, 0.0, 400);

        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::CooldownChanged { active: true, .. })));
        let opened = query::target(&engine).sequence() - 1;
        assert!(opened > 5, "opened {opened} piñatas");
        assert_eq!(query::score(&engine).score(), opened * (opened + 1) / 2);
    }

    #[test]
    fn clumsy_bot_overshoots_the_first_target() {
        let (engine, events) = play(EngineConfig::default(), 1.0, 10);

        assert!(events.contains(&Event::CooldownChanged {
            active: true,
            duration: Duration::from_secs(3),
        }));
        assert_eq!(query::phase(&engine), EnginePhase::Cooldown);
        assert_eq!(query::score(&engine).score(), 0);
    }
}
