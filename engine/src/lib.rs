#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative interaction engine for a single piñata match.
//!
//! The engine accumulates clicks on the live piñata, detects overshoots,
//! applies cooldown penalties and timing-gap resets, and spends power-ups. It
//! is advanced exclusively by its callers: clicks and power-up presses arrive
//! as they happen, and [`Engine::on_tick`] moves every timer forward. Each
//! operation appends the notifications it produced to a caller-owned buffer.

use std::{cmp::Ordering, time::Duration};

use log::{debug, info};
use pinata_core::{display_seconds, Command, EngineConfig, EnginePhase, Event, RewardKind};
use pinata_system_rewards::{roll_critical_bonus, RewardLedger, RewardRng, SeededRng};

mod state;

pub use state::{ScoreState, TargetState};

/// Private phase of the click state machine, carrying its running timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Active,
    Grace { remaining: Duration },
    Cooldown { remaining: Duration },
}

impl Phase {
    const fn public(self) -> EnginePhase {
        match self {
            Self::Active => EnginePhase::Active,
            Self::Grace { .. } => EnginePhase::Grace,
            Self::Cooldown { .. } => EnginePhase::Cooldown,
        }
    }

    const fn is_cooldown(self) -> bool {
        matches!(self, Self::Cooldown { .. })
    }
}

/// Owns the game state of one match and decides every transition.
#[derive(Debug)]
pub struct Engine<R = SeededRng> {
    config: EngineConfig,
    score: ScoreState,
    target: TargetState,
    phase: Phase,
    last_click: Option<Duration>,
    rewards: RewardLedger,
    rng: R,
}

impl Engine<SeededRng> {
    /// Creates an engine whose reward rolls are reproducible from `seed`.
    #[must_use]
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        Self::new(config, SeededRng::new(seed))
    }
}

impl<R: RewardRng> Engine<R> {
    /// Starts a match on the first piñata using the provided randomness source.
    #[must_use]
    pub fn new(config: EngineConfig, rng: R) -> Self {
        Self {
            score: ScoreState::starting(&config),
            target: TargetState::first(),
            phase: Phase::Active,
            last_click: None,
            rewards: RewardLedger::new(),
            config,
            rng,
        }
    }

    /// Emits the current values a freshly attached surface needs to render.
    pub fn announce(&self, out_events: &mut Vec<Event>) {
        out_events.push(Event::ScoreChanged {
            score: self.score.score,
        });
        out_events.push(Event::CountdownChanged {
            remaining: self.score.countdown,
        });
        out_events.push(Event::TargetChanged {
            sequence: self.target.sequence,
            clicks_required: self.target.clicks_required,
        });
        out_events.push(Event::BombCountChanged {
            count: self.score.bomb_count,
        });
        out_events.push(Event::CriticalCountChanged {
            count: self.score.critical_count,
        });
    }

    /// Registers a click on the live piñata at timestamp `now`.
    ///
    /// Clicks during a cooldown are discarded. A click arriving more than the
    /// configured interval after the previous one discards accumulated progress
    /// instead of counting, unless the grace window is running.
    pub fn on_click(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        if self.phase.is_cooldown() {
            return;
        }

        if self.target.clicks_landed > 0 && self.phase == Phase::Active {
            if let Some(last) = self.last_click {
                if now.saturating_sub(last) > self.config.max_click_interval() {
                    debug!(
                        "gap reset on piñata #{} after {:?}",
                        self.target.sequence,
                        now.saturating_sub(last)
                    );
                    self.target.clicks_landed = 0;
                    out_events.push(Event::GapWarning {
                        duration: self.config.gap_warning(),
                    });
                    return;
                }
            }
        }

        self.last_click = Some(now);
        let increment = 1 + self.score.take_critical_bonus();
        self.target.clicks_landed = self.target.clicks_landed.saturating_add(increment);
        out_events.push(Event::HitRegistered);

        match self.phase {
            Phase::Grace { .. } => {
                debug!("click during grace window overshot piñata #{}", self.target.sequence);
                self.enter_cooldown(out_events);
            }
            Phase::Active => match self.target.clicks_landed.cmp(&self.target.clicks_required) {
                Ordering::Equal => {
                    debug!("piñata #{} reached its click count", self.target.sequence);
                    self.phase = Phase::Grace {
                        remaining: self.config.overshoot_grace_period(),
                    };
                }
                Ordering::Greater => {
                    debug!(
                        "piñata #{} overshot with {} of {} clicks",
                        self.target.sequence,
                        self.target.clicks_landed,
                        self.target.clicks_required
                    );
                    self.enter_cooldown(out_events);
                }
                Ordering::Less => {}
            },
            Phase::Cooldown { .. } => {}
        }
    }

    /// Advances the grace or cooldown timer and the match clock by `dt`.
    pub fn on_tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let expired = match &mut self.phase {
            Phase::Active => false,
            Phase::Grace { remaining } | Phase::Cooldown { remaining } => {
                *remaining = remaining.saturating_sub(dt);
                remaining.is_zero()
            }
        };

        if expired {
            match self.phase {
                Phase::Grace { .. } => self.finalize_open(out_events),
                Phase::Cooldown { .. } => self.end_cooldown(out_events),
                Phase::Active => {}
            }
        }

        self.advance_countdown(dt, out_events);
    }

    /// Spends a bomb, opening the live piñata unless a cooldown is running.
    pub fn use_bomb(&mut self, out_events: &mut Vec<Event>) {
        if self.score.bomb_count == 0 {
            return;
        }

        self.score.bomb_count -= 1;
        out_events.push(Event::BombCountChanged {
            count: self.score.bomb_count,
        });

        if !self.phase.is_cooldown() && !self.target.opened {
            debug!("bomb detonated on piñata #{}", self.target.sequence);
            self.finalize_open(out_events);
        }
    }

    /// Spends a critical, arming a bonus for the next accepted click.
    pub fn use_critical(&mut self, out_events: &mut Vec<Event>) {
        if self.score.critical_count == 0 {
            return;
        }

        self.score.critical_count -= 1;
        out_events.push(Event::CriticalCountChanged {
            count: self.score.critical_count,
        });

        let bonus = roll_critical_bonus(self.target.clicks_required, &mut self.rng);
        self.score.pending_critical_bonus = bonus;
        out_events.push(Event::CriticalBonusGranted {
            extra_clicks: bonus,
        });
    }

    fn enter_cooldown(&mut self, out_events: &mut Vec<Event>) {
        let duration = self.config.cooldown();
        self.target.clicks_landed = 0;
        self.target.on_cooldown = true;
        self.phase = Phase::Cooldown {
            remaining: duration,
        };
        out_events.push(Event::CooldownChanged {
            active: true,
            duration,
        });
    }

    fn end_cooldown(&mut self, out_events: &mut Vec<Event>) {
        debug!("cooldown on piñata #{} elapsed", self.target.sequence);
        self.target.on_cooldown = false;
        self.phase = Phase::Active;
        out_events.push(Event::CooldownChanged {
            active: false,
            duration: Duration::ZERO,
        });
    }

    fn finalize_open(&mut self, out_events: &mut Vec<Event>) {
        if self.phase.is_cooldown() {
            return;
        }

        self.target.opened = true;
        self.score.score = self.score.score.saturating_add(self.target.sequence);
        debug!(
            "piñata #{} opened, score now {}",
            self.target.sequence, self.score.score
        );
        out_events.push(Event::ScoreChanged {
            score: self.score.score,
        });

        let rolls = self.rewards.record_open(&self.config, &mut self.rng);
        for kind in rolls.granted() {
            self.grant(kind, out_events);
        }

        self.target = self.target.successor();
        self.phase = Phase::Active;
        out_events.push(Event::TargetChanged {
            sequence: self.target.sequence,
            clicks_required: self.target.clicks_required,
        });
    }

    fn grant(&mut self, kind: RewardKind, out_events: &mut Vec<Event>) {
        match kind {
            RewardKind::Critical => {
                self.score.critical_count = self.score.critical_count.saturating_add(1);
                out_events.push(Event::CriticalCountChanged {
                    count: self.score.critical_count,
                });
            }
            RewardKind::Bomb => {
                self.score.bomb_count = self.score.bomb_count.saturating_add(1);
                out_events.push(Event::BombCountChanged {
                    count: self.score.bomb_count,
                });
            }
        }
        info!("{kind:?} granted after opening piñata #{}", self.target.sequence);
        out_events.push(Event::RewardGranted { kind });
    }

    fn advance_countdown(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let shown = display_seconds(self.score.countdown);
        self.score.countdown = self.score.countdown.saturating_sub(dt);
        if display_seconds(self.score.countdown) != shown {
            out_events.push(Event::CountdownChanged {
                remaining: self.score.countdown,
            });
        }
    }
}

/// Applies the provided command to the engine, appending resulting notifications.
pub fn apply<R: RewardRng>(engine: &mut Engine<R>, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Click { at } => engine.on_click(at, out_events),
        Command::Tick { dt } => engine.on_tick(dt, out_events),
        Command::UseBomb => engine.use_bomb(out_events),
        Command::UseCritical => engine.use_critical(out_events),
    }
}

/// Query functions that provide read-only access to the engine state.
pub mod query {
    use pinata_core::{EngineConfig, EnginePhase};

    use super::{Engine, ScoreState, TargetState};

    /// Provides read-only access to the score, clock, and inventory.
    #[must_use]
    pub fn score<R>(engine: &Engine<R>) -> &ScoreState {
        &engine.score
    }

    /// Provides read-only access to the live piñata.
    #[must_use]
    pub fn target<R>(engine: &Engine<R>) -> &TargetState {
        &engine.target
    }

    /// Reports which phase of the click state machine is active.
    #[must_use]
    pub fn phase<R>(engine: &Engine<R>) -> EnginePhase {
        engine.phase.public()
    }

    /// Reports whether the match clock has run out.
    #[must_use]
    pub fn match_over<R>(engine: &Engine<R>) -> bool {
        engine.score.countdown.is_zero()
    }

    /// Provides read-only access to the configuration the engine runs with.
    #[must_use]
    pub fn config<R>(engine: &Engine<R>) -> &EngineConfig {
        &engine.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinata_system_rewards::ScriptedRng;

    fn engine() -> Engine<ScriptedRng> {
        Engine::new(EngineConfig::default(), ScriptedRng::new())
    }

    #[test]
    fn exact_hit_starts_grace_timer_from_configuration() {
        let mut engine = engine();
        let mut events = Vec::new();

        engine.on_click(Duration::ZERO, &mut events);

        assert_eq!(
            engine.phase,
            Phase::Grace {
                remaining: Duration::from_secs(1)
            }
        );
    }

    #[test]
    fn grace_timer_counts_down_across_ticks() {
        let mut engine = engine();
        let mut events = Vec::new();
        engine.on_click(Duration::ZERO, &mut events);

        engine.on_tick(Duration::from_millis(400), &mut events);

        assert_eq!(
            engine.phase,
            Phase::Grace {
                remaining: Duration::from_millis(600)
            }
        );
    }

    #[test]
    fn overshoot_replaces_grace_timer_with_cooldown() {
        let mut engine = engine();
        let mut events = Vec::new();
        engine.on_click(Duration::ZERO, &mut events);
        engine.on_tick(Duration::from_millis(900), &mut events);

        engine.on_click(Duration::from_millis(950), &mut events);

        assert_eq!(
            engine.phase,
            Phase::Cooldown {
                remaining: Duration::from_secs(3)
            }
        );
    }

    #[test]
    fn finalize_is_ignored_while_cooling_down() {
        let mut engine = engine();
        let mut events = Vec::new();
        engine.on_click(Duration::ZERO, &mut events);
        engine.on_click(Duration::from_millis(10), &mut events);
        events.clear();

        engine.finalize_open(&mut events);

        assert!(events.is_empty());
        assert_eq!(engine.score.score(), 0);
        assert_eq!(engine.target.sequence(), 1);
    }

    #[test]
    fn gap_check_uses_last_accepted_click() {
        let mut engine = Engine::new(EngineConfig::default(), ScriptedRng::new());
        engine.target = engine.target.successor().successor();
        let mut events = Vec::new();

        engine.on_click(Duration::ZERO, &mut events);
        engine.on_click(Duration::from_millis(1_900), &mut events);

        assert_eq!(engine.last_click, Some(Duration::from_millis(1_900)));
        assert_eq!(engine.target.clicks_landed(), 2);
    }

    #[test]
    fn countdown_notifies_only_when_displayed_second_changes() {
        let mut engine = engine();
        let mut events = Vec::new();

        engine.on_tick(Duration::from_millis(500), &mut events);
        assert!(events.is_empty(), "59.5s still displays as 60");

        engine.on_tick(Duration::from_millis(600), &mut events);
        assert_eq!(
            events,
            vec![Event::CountdownChanged {
                remaining: Duration::from_millis(58_900)
            }]
        );
    }
}
