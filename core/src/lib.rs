#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the piñata interaction engine.
//!
//! This crate defines the message surface that connects the presentation
//! layer with the authoritative engine. Adapters submit [`Command`] values
//! describing player input and the passage of time, the engine executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that presentation surfaces render. Configuration records and the single
//! reportable error, [`ConfigurationError`], live here as well so adapters can
//! validate settings without depending on the engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod config;

pub use config::{ConfigFile, ConfigurationError, EngineConfig, RewardTable, RewardTableFile};

/// Commands that express all permissible engine inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Reports that the player clicked the live piñata.
    Click {
        /// Timestamp of the click measured from the caller's chosen origin.
        at: Duration,
    },
    /// Advances the engine clock by the provided delta time.
    Tick {
        /// Duration of time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Spends one bomb to force-open the live piñata.
    UseBomb,
    /// Spends one critical to boost the next accepted click.
    UseCritical,
}

/// Notifications broadcast by the engine after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Reports the cumulative score after it changed.
    ScoreChanged {
        /// Score accumulated so far in the match.
        score: u32,
    },
    /// Reports the remaining match time.
    CountdownChanged {
        /// Time left on the match clock, never negative.
        remaining: Duration,
    },
    /// Announces that a new piñata replaced the previous one.
    TargetChanged {
        /// Ordinal of the live piñata, starting at one.
        sequence: u32,
        /// Clicks needed to crack the live piñata.
        clicks_required: u32,
    },
    /// Announces entering or leaving the overshoot penalty.
    CooldownChanged {
        /// Whether the cooldown is now in effect.
        active: bool,
        /// Length of the cooldown that started, zero when it ended.
        duration: Duration,
    },
    /// Warns that progress was discarded because clicks arrived too slowly.
    GapWarning {
        /// How long the warning should stay visible.
        duration: Duration,
    },
    /// Confirms that a click was accepted.
    HitRegistered,
    /// Reports the bomb inventory after it changed.
    BombCountChanged {
        /// Bombs available to spend.
        count: u32,
    },
    /// Reports the critical inventory after it changed.
    CriticalCountChanged {
        /// Criticals available to spend.
        count: u32,
    },
    /// Announces the extra weight the next accepted click will carry.
    CriticalBonusGranted {
        /// Clicks added on top of the regular single click.
        extra_clicks: u32,
    },
    /// Announces that opening a piñata earned a power-up.
    RewardGranted {
        /// Power-up that was earned.
        kind: RewardKind,
    },
}

/// Power-ups the player can earn and spend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardKind {
    /// Force-opens the live piñata, skipping click accumulation.
    Bomb,
    /// Adds bonus weight to the next accepted click.
    Critical,
}

/// Externally visible phase of the click state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Clicks accumulate normally.
    Active,
    /// The required count was reached exactly and a further click would overshoot.
    Grace,
    /// Clicks are ignored until the penalty elapses.
    Cooldown,
}

/// Rounds remaining time up to the whole second a countdown display shows.
#[must_use]
pub fn display_seconds(remaining: Duration) -> u64 {
    let whole = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        whole + 1
    } else {
        whole
    }
}
