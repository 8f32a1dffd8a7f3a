#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation contracts for piñata adapters.
//!
//! Surfaces implement [`PresentationSurface`] and receive engine notifications
//! through [`dispatch`]. Every callback has an empty default so a surface only
//! overrides what it actually renders. [`Hud`] is a text surface that keeps
//! the strings a heads-up display would show.

use std::time::Duration;

use pinata_core::{Event, RewardKind};

mod hud;

pub use hud::{Hud, Toast};

/// Observer that renders engine notifications.
pub trait PresentationSurface {
    /// The cumulative score changed.
    fn score_changed(&mut self, _score: u32) {}

    /// The match clock crossed into a new displayed second.
    fn countdown_changed(&mut self, _remaining: Duration) {}

    /// A new piñata replaced the previous one.
    fn target_changed(&mut self, _sequence: u32, _clicks_required: u32) {}

    /// The overshoot penalty started or ended.
    fn cooldown_changed(&mut self, _active: bool, _duration: Duration) {}

    /// Progress was discarded because clicks arrived too slowly.
    fn gap_warning(&mut self, _duration: Duration) {}

    /// A click was accepted; hit effects belong here.
    fn hit_registered(&mut self) {}

    /// The bomb inventory changed.
    fn bomb_count_changed(&mut self, _count: u32) {}

    /// The critical inventory changed.
    fn critical_count_changed(&mut self, _count: u32) {}

    /// A critical armed a bonus for the next click.
    fn critical_bonus_granted(&mut self, _extra_clicks: u32) {}

    /// Opening a piñata earned a power-up.
    fn reward_granted(&mut self, _kind: RewardKind) {}
}

/// Forwards each event, in order, to the matching surface callback.
pub fn dispatch<S>(surface: &mut S, events: &[Event])
where
    S: PresentationSurface + ?Sized,
{
    for event in events {
        match *event {
            Event::ScoreChanged { score } => surface.score_changed(score),
            Event::CountdownChanged { remaining } => surface.countdown_changed(remaining),
            Event::TargetChanged {
                sequence,
                clicks_required,
            } => surface.target_changed(sequence, clicks_required),
            Event::CooldownChanged { active, duration } => {
                surface.cooldown_changed(active, duration);
            }
            Event::GapWarning { duration } => surface.gap_warning(duration),
            Event::HitRegistered => surface.hit_registered(),
            Event::BombCountChanged { count } => surface.bomb_count_changed(count),
            Event::CriticalCountChanged { count } => surface.critical_count_changed(count),
            Event::CriticalBonusGranted { extra_clicks } => {
                surface.critical_bonus_granted(extra_clicks);
            }
            Event::RewardGranted { kind } => surface.reward_granted(kind),
        }
    }
}

/// Forwards the same batch of events to several surfaces.
pub fn dispatch_all(surfaces: &mut [&mut dyn PresentationSurface], events: &[Event]) {
    for surface in surfaces.iter_mut() {
        dispatch(&mut **surface, events);
    }
}
