//! Engine tuning parameters and their validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_MAX_CLICK_INTERVAL_SECS: f32 = 2.0;
const DEFAULT_OVERSHOOT_GRACE_PERIOD_SECS: f32 = 1.0;
const DEFAULT_COOLDOWN_SECS: f32 = 3.0;
const DEFAULT_GAP_WARNING_SECS: f32 = 2.0;
const DEFAULT_MATCH_DURATION_SECS: f32 = 60.0;

const DEFAULT_CRITICAL_TABLE: RewardTable = RewardTable {
    min_opens: 5,
    chance: 0.3,
};
const DEFAULT_BOMB_TABLE: RewardTable = RewardTable {
    min_opens: 3,
    chance: 0.2,
};

/// Reasons a configuration is rejected before an engine can be built.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    /// A duration setting was zero, negative, or not a finite number.
    #[error("`{field}` must be a positive, finite number of seconds (got {value})")]
    NonPositiveDuration {
        /// Name of the offending setting.
        field: &'static str,
        /// Value that was supplied.
        value: f32,
    },
    /// A reward probability fell outside the unit interval.
    #[error("`{field}` must be a probability between 0 and 1 (got {value})")]
    ProbabilityOutOfRange {
        /// Name of the offending setting.
        field: &'static str,
        /// Value that was supplied.
        value: f32,
    },
}

/// Reward roll settings as written in a configuration file.
///
/// Absent fields keep the shipped value of the table they belong to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewardTableFile {
    /// Piñatas that must be opened since the last grant before rolling.
    pub min_opens: Option<u32>,
    /// Chance that an eligible roll grants the reward.
    pub chance: Option<f32>,
}

impl RewardTableFile {
    fn validate(
        self,
        field: &'static str,
        defaults: RewardTable,
    ) -> Result<RewardTable, ConfigurationError> {
        RewardTable::validated(
            field,
            self.min_opens.unwrap_or(defaults.min_opens),
            self.chance.unwrap_or(defaults.chance),
        )
    }
}

/// Unvalidated engine settings, expressed in plain seconds and probabilities.
///
/// Missing fields fall back to the defaults of the shipped game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Longest pause tolerated between consecutive clicks before progress resets.
    pub max_click_interval_secs: f32,
    /// Window after an exact hit during which another click counts as overshoot.
    pub overshoot_grace_period_secs: f32,
    /// Length of the overshoot penalty.
    pub cooldown_secs: f32,
    /// How long the gap warning should remain visible.
    pub gap_warning_secs: f32,
    /// Total match length.
    pub match_duration_secs: f32,
    /// Bombs held when the match starts.
    pub starting_bombs: u32,
    /// Criticals held when the match starts.
    pub starting_criticals: u32,
    /// Critical reward roll settings.
    pub critical: RewardTableFile,
    /// Bomb reward roll settings.
    pub bomb: RewardTableFile,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            max_click_interval_secs: DEFAULT_MAX_CLICK_INTERVAL_SECS,
            overshoot_grace_period_secs: DEFAULT_OVERSHOOT_GRACE_PERIOD_SECS,
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            gap_warning_secs: DEFAULT_GAP_WARNING_SECS,
            match_duration_secs: DEFAULT_MATCH_DURATION_SECS,
            starting_bombs: 0,
            starting_criticals: 0,
            critical: RewardTableFile::default(),
            bomb: RewardTableFile::default(),
        }
    }
}

impl ConfigFile {
    /// Checks every setting and converts the file into an [`EngineConfig`].
    pub fn validate(&self) -> Result<EngineConfig, ConfigurationError> {
        Ok(EngineConfig {
            max_click_interval: positive_duration(
                "max_click_interval_secs",
                self.max_click_interval_secs,
            )?,
            overshoot_grace_period: positive_duration(
                "overshoot_grace_period_secs",
                self.overshoot_grace_period_secs,
            )?,
            cooldown: positive_duration("cooldown_secs", self.cooldown_secs)?,
            gap_warning: positive_duration("gap_warning_secs", self.gap_warning_secs)?,
            match_duration: positive_duration("match_duration_secs", self.match_duration_secs)?,
            starting_bombs: self.starting_bombs,
            starting_criticals: self.starting_criticals,
            critical: self.critical.validate("critical.chance", DEFAULT_CRITICAL_TABLE)?,
            bomb: self.bomb.validate("bomb.chance", DEFAULT_BOMB_TABLE)?,
        })
    }
}

fn positive_duration(field: &'static str, value: f32) -> Result<Duration, ConfigurationError> {
    let error = ConfigurationError::NonPositiveDuration { field, value };
    if !value.is_finite() || value <= 0.0 {
        return Err(error);
    }
    Duration::try_from_secs_f32(value).map_err(|_| error)
}

/// Validated reward roll settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardTable {
    min_opens: u32,
    chance: f32,
}

impl RewardTable {
    /// Creates a reward table, rejecting chances outside `0.0..=1.0`.
    pub fn new(min_opens: u32, chance: f32) -> Result<Self, ConfigurationError> {
        Self::validated("chance", min_opens, chance)
    }

    fn validated(
        field: &'static str,
        min_opens: u32,
        chance: f32,
    ) -> Result<Self, ConfigurationError> {
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigurationError::ProbabilityOutOfRange {
                field,
                value: chance,
            });
        }
        Ok(Self { min_opens, chance })
    }

    /// Opens required since the last grant before a roll happens.
    #[must_use]
    pub const fn min_opens(&self) -> u32 {
        self.min_opens
    }

    /// Probability that an eligible roll grants the reward.
    #[must_use]
    pub const fn chance(&self) -> f32 {
        self.chance
    }
}

/// Validated engine settings. Every duration is strictly positive.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    max_click_interval: Duration,
    overshoot_grace_period: Duration,
    cooldown: Duration,
    gap_warning: Duration,
    match_duration: Duration,
    starting_bombs: u32,
    starting_criticals: u32,
    critical: RewardTable,
    bomb: RewardTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_click_interval: Duration::from_secs_f32(DEFAULT_MAX_CLICK_INTERVAL_SECS),
            overshoot_grace_period: Duration::from_secs_f32(DEFAULT_OVERSHOOT_GRACE_PERIOD_SECS),
            cooldown: Duration::from_secs_f32(DEFAULT_COOLDOWN_SECS),
            gap_warning: Duration::from_secs_f32(DEFAULT_GAP_WARNING_SECS),
            match_duration: Duration::from_secs_f32(DEFAULT_MATCH_DURATION_SECS),
            starting_bombs: 0,
            starting_criticals: 0,
            critical: DEFAULT_CRITICAL_TABLE,
            bomb: DEFAULT_BOMB_TABLE,
        }
    }
}

impl EngineConfig {
    /// Longest pause tolerated between consecutive clicks.
    #[must_use]
    pub const fn max_click_interval(&self) -> Duration {
        self.max_click_interval
    }

    /// Window after an exact hit during which another click overshoots.
    #[must_use]
    pub const fn overshoot_grace_period(&self) -> Duration {
        self.overshoot_grace_period
    }

    /// Length of the overshoot penalty.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Display time attached to gap warnings.
    #[must_use]
    pub const fn gap_warning(&self) -> Duration {
        self.gap_warning
    }

    /// Total match length.
    #[must_use]
    pub const fn match_duration(&self) -> Duration {
        self.match_duration
    }

    /// Bombs held when the match starts.
    #[must_use]
    pub const fn starting_bombs(&self) -> u32 {
        self.starting_bombs
    }

    /// Criticals held when the match starts.
    #[must_use]
    pub const fn starting_criticals(&self) -> u32 {
        self.starting_criticals
    }

    /// Critical reward roll settings.
    #[must_use]
    pub const fn critical(&self) -> RewardTable {
        self.critical
    }

    /// Bomb reward roll settings.
    #[must_use]
    pub const fn bomb(&self) -> RewardTable {
        self.bomb
    }
}
