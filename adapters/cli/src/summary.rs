use pinata_core::{Event, RewardKind};
use serde::Serialize;

/// Totals collected from the notifications of one match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct MatchSummary {
    pub(crate) score: u32,
    pub(crate) opened: u32,
    pub(crate) cooldowns: u32,
    pub(crate) gap_resets: u32,
    pub(crate) bombs_won: u32,
    pub(crate) criticals_won: u32,
}

impl MatchSummary {
    /// Folds a batch of notifications into the totals.
    pub(crate) fn record(&mut self, events: &[Event]) {
        for event in events {
            match *event {
                Event::ScoreChanged { score } => self.score = score,
                Event::TargetChanged { sequence, .. } => {
                    self.opened = sequence.saturating_sub(1);
                }
                Event::CooldownChanged { active: true, .. } => self.cooldowns += 1,
                Event::GapWarning { .. } => self.gap_resets += 1,
                Event::RewardGranted {
                    kind: RewardKind::Bomb,
                } => self.bombs_won += 1,
                Event::RewardGranted {
                    kind: RewardKind::Critical,
                } => self.criticals_won += 1,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn summary_counts_penalties_and_rewards() {
        let mut summary = MatchSummary::default();

        summary.record(&[
            Event::ScoreChanged { score: 3 },
            Event::RewardGranted {
                kind: RewardKind::Bomb,
            },
            Event::TargetChanged {
                sequence: 3,
                clicks_required: 3,
            },
            Event::CooldownChanged {
                active: true,
                duration: Duration::from_secs(3),
            },
            Event::CooldownChanged {
                active: false,
                duration: Duration::ZERO,
            },
            Event::GapWarning {
                duration: Duration::from_secs(2),
            },
        ]);

        assert_eq!(
            summary,
            MatchSummary {
                score: 3,
                opened: 2,
                cooldowns: 1,
                gap_resets: 1,
                bombs_won: 1,
                criticals_won: 0,
            }
        );
    }
}
