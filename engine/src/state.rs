//! Score and target records owned by the engine.

use std::time::Duration;

use pinata_core::EngineConfig;

/// Match-wide score, clock, and power-up inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreState {
    pub(crate) score: u32,
    pub(crate) countdown: Duration,
    pub(crate) bomb_count: u32,
    pub(crate) critical_count: u32,
    pub(crate) pending_critical_bonus: u32,
}

impl ScoreState {
    pub(crate) fn starting(config: &EngineConfig) -> Self {
        Self {
            score: 0,
            countdown: config.match_duration(),
            bomb_count: config.starting_bombs(),
            critical_count: config.starting_criticals(),
            pending_critical_bonus: 0,
        }
    }

    /// Cumulative points earned in the match.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Remaining match time; zero once the clock has run out.
    #[must_use]
    pub const fn countdown(&self) -> Duration {
        self.countdown
    }

    /// Bombs available to spend.
    #[must_use]
    pub const fn bomb_count(&self) -> u32 {
        self.bomb_count
    }

    /// Criticals available to spend.
    #[must_use]
    pub const fn critical_count(&self) -> u32 {
        self.critical_count
    }

    /// Extra weight the next accepted click will carry.
    #[must_use]
    pub const fn pending_critical_bonus(&self) -> u32 {
        self.pending_critical_bonus
    }

    /// Consumes the pending critical bonus, leaving none behind.
    pub(crate) fn take_critical_bonus(&mut self) -> u32 {
        std::mem::take(&mut self.pending_critical_bonus)
    }
}

/// Progress on the live piñata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetState {
    pub(crate) sequence: u32,
    pub(crate) clicks_required: u32,
    pub(crate) clicks_landed: u32,
    pub(crate) on_cooldown: bool,
    pub(crate) opened: bool,
}

impl TargetState {
    pub(crate) const fn first() -> Self {
        Self::numbered(1)
    }

    /// Replacement spawned once this piñata opens.
    pub(crate) fn successor(&self) -> Self {
        Self::numbered(self.sequence.saturating_add(1))
    }

    const fn numbered(sequence: u32) -> Self {
        Self {
            sequence,
            clicks_required: sequence,
            clicks_landed: 0,
            on_cooldown: false,
            opened: false,
        }
    }

    /// Ordinal of the piñata within the match, starting at one.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Clicks needed to crack the piñata.
    #[must_use]
    pub const fn clicks_required(&self) -> u32 {
        self.clicks_required
    }

    /// Clicks counted toward the piñata so far.
    #[must_use]
    pub const fn clicks_landed(&self) -> u32 {
        self.clicks_landed
    }

    /// Whether the overshoot penalty is in effect.
    #[must_use]
    pub const fn on_cooldown(&self) -> bool {
        self.on_cooldown
    }

    /// Whether the piñata has been opened.
    #[must_use]
    pub const fn opened(&self) -> bool {
        self.opened
    }
}
