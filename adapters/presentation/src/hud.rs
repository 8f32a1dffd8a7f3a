use std::time::Duration;

use pinata_core::{display_seconds, RewardKind};

use crate::PresentationSurface;

const CRITICAL_REWARD_TOAST: Duration = Duration::from_secs(3);
const BOMB_REWARD_TOAST: Duration = Duration::from_secs(2);
const CRITICAL_BONUS_TOAST: Duration = Duration::from_secs(3);

/// Short-lived message shown on top of the play field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    message: String,
    remaining: Duration,
}

impl Toast {
    fn new(message: impl Into<String>, remaining: Duration) -> Self {
        Self {
            message: message.into(),
            remaining,
        }
    }

    /// Text of the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Time left before the message disappears.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }
}

/// Text heads-up display assembled from engine notifications.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    score: u32,
    countdown: Duration,
    sequence: u32,
    clicks_required: u32,
    bombs: u32,
    criticals: u32,
    cooldown: Option<Duration>,
    toasts: Vec<Toast>,
    hits: u64,
}

impl Hud {
    /// Creates an empty display; attach it with the engine's announcement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the overlay countdown and expires toasts.
    pub fn advance(&mut self, dt: Duration) {
        if let Some(remaining) = self.cooldown.as_mut() {
            *remaining = remaining.saturating_sub(dt);
        }

        for toast in &mut self.toasts {
            toast.remaining = toast.remaining.saturating_sub(dt);
        }
        self.toasts.retain(|toast| !toast.remaining.is_zero());
    }

    /// Score line, e.g. `Score: 10`.
    #[must_use]
    pub fn score_line(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Match clock line in whole seconds rounded up.
    #[must_use]
    pub fn timer_line(&self) -> String {
        format!("Time Left: {}", display_seconds(self.countdown))
    }

    /// Identifies the live piñata.
    #[must_use]
    pub fn target_line(&self) -> String {
        format!("Piñata #{} ({} clicks)", self.sequence, self.clicks_required)
    }

    /// Power-up inventory lines.
    #[must_use]
    pub fn inventory_lines(&self) -> [String; 2] {
        [
            format!("Bombs: {}", self.bombs),
            format!("Criticals: {}", self.criticals),
        ]
    }

    /// Cooldown overlay text while a penalty is running.
    #[must_use]
    pub fn cooldown_line(&self) -> Option<String> {
        self.cooldown
            .map(|remaining| format!("Cooldown: {}", display_seconds(remaining)))
    }

    /// Toasts still on screen, oldest first.
    pub fn toasts(&self) -> impl Iterator<Item = &Toast> + '_ {
        self.toasts.iter()
    }

    /// Number of hits registered since the display was created.
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Every line the display currently shows, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.score_line(), self.timer_line(), self.target_line()];
        lines.extend(self.inventory_lines());
        lines.extend(self.cooldown_line());
        lines.extend(self.toasts.iter().map(|toast| toast.message.clone()));
        lines
    }

    fn push_toast(&mut self, message: impl Into<String>, duration: Duration) {
        if !duration.is_zero() {
            self.toasts.push(Toast::new(message, duration));
        }
    }
}

impl PresentationSurface for Hud {
    fn score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn countdown_changed(&mut self, remaining: Duration) {
        self.countdown = remaining;
    }

    fn target_changed(&mut self, sequence: u32, clicks_required: u32) {
        self.sequence = sequence;
        self.clicks_required = clicks_required;
    }

    fn cooldown_changed(&mut self, active: bool, duration: Duration) {
        self.cooldown = active.then_some(duration);
    }

    fn gap_warning(&mut self, duration: Duration) {
        self.push_toast("Taking your time huh?", duration);
    }

    fn hit_registered(&mut self) {
        self.hits += 1;
    }

    fn bomb_count_changed(&mut self, count: u32) {
        self.bombs = count;
    }

    fn critical_count_changed(&mut self, count: u32) {
        self.criticals = count;
    }

    fn critical_bonus_granted(&mut self, extra_clicks: u32) {
        self.push_toast(
            format!("Your next click = {} clicks!", extra_clicks + 1),
            CRITICAL_BONUS_TOAST,
        );
    }

    fn reward_granted(&mut self, kind: RewardKind) {
        match kind {
            RewardKind::Critical => {
                self.push_toast("You've won A Critical Hit TNT!", CRITICAL_REWARD_TOAST);
            }
            RewardKind::Bomb => self.push_toast("You've won A BOMB!", BOMB_REWARD_TOAST),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_line_rounds_partial_seconds_up() {
        let mut hud = Hud::new();
        hud.countdown_changed(Duration::from_millis(58_100));

        assert_eq!(hud.timer_line(), "Time Left: 59");
    }

    #[test]
    fn toasts_expire_after_their_duration() {
        let mut hud = Hud::new();
        hud.reward_granted(RewardKind::Bomb);
        hud.reward_granted(RewardKind::Critical);

        hud.advance(Duration::from_millis(1_999));
        assert_eq!(hud.toasts().count(), 2);

        hud.advance(Duration::from_millis(1));
        let remaining: Vec<&str> = hud.toasts().map(Toast::message).collect();
        assert_eq!(remaining, vec!["You've won A Critical Hit TNT!"]);
        assert_eq!(
            hud.toasts().next().map(Toast::remaining),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn critical_bonus_toast_counts_the_click_itself() {
        let mut hud = Hud::new();
        hud.critical_bonus_granted(3);

        assert_eq!(
            hud.toasts().next().map(Toast::message),
            Some("Your next click = 4 clicks!")
        );
    }

    #[test]
    fn cooldown_overlay_counts_down_until_cleared() {
        let mut hud = Hud::new();
        hud.cooldown_changed(true, Duration::from_secs(3));
        hud.advance(Duration::from_millis(1_500));

        assert_eq!(hud.cooldown_line().as_deref(), Some("Cooldown: 2"));

        hud.cooldown_changed(false, Duration::ZERO);
        assert_eq!(hud.cooldown_line(), None);
    }
}
