//! Grace-period state machine.
//!
//! The engine is a wall-clock-based state machine over simulation time. It
//! has no internal thread and never samples a clock - the host passes the
//! current simulation time into every call, and the governing objective's
//! update hook is expected to call `tick()` once per simulation tick.
//!
//! ## State Transitions
//!
//! ```text
//! Compliant -> OutOfArea -> Compliant
//! ```
//!
//! `Compliant` is the absent state (no leave time recorded). A tick that
//! observes the player outside the allowed bounds while the quest is live
//! records the leave time and selects the threshold pair for the objective
//! kind; any tick that observes the player back inside (or in the warning
//! sub-zone), the player dead, the quest no longer in progress, or the
//! timeout elapsed drops back to `Compliant`.

use serde::{Deserialize, Serialize};

use super::thresholds::{GraceProfile, GraceThresholds, ObjectiveKind};
use crate::area::Containment;

/// A running grace period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraceState {
    pub kind: ObjectiveKind,
    /// Simulation time at which the player was last observed leaving.
    pub left_at: f64,
    /// Threshold pair selected for `kind` when this period began.
    pub thresholds: GraceThresholds,
}

impl GraceState {
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.left_at
    }

    /// Remaining grace time, floored at zero.
    pub fn remaining(&self, now: f64) -> f64 {
        (self.thresholds.timeout_secs - self.elapsed(now)).max(0.0)
    }
}

/// Everything the engine needs to know about one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickStatus {
    /// Current simulation time in seconds.
    pub now: f64,
    pub kind: ObjectiveKind,
    pub containment: Containment,
    pub quest_in_progress: bool,
    pub player_alive: bool,
}

impl TickStatus {
    /// A grace period only runs while the quest is live and the player is
    /// alive; anything else invalidates it on the next tick.
    pub fn quest_valid(&self) -> bool {
        self.quest_in_progress && self.player_alive
    }
}

/// What a tick decided. `Expired` and `Invalidated` carry the state that
/// was just dropped so callers can report how the period ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum TickOutcome {
    /// Nothing to do: player compliant (or quest already dead) with no
    /// grace period in flight.
    Idle,
    /// A grace period began this tick.
    Started,
    /// Grace period still running; the failure path stays suppressed.
    Deferred,
    /// Player came back within bounds; cleared regardless of elapsed time.
    Returned { cleared: GraceState },
    /// The timeout elapsed; the real failure may proceed.
    Expired { cleared: GraceState },
    /// Quest no longer in progress or player dead; failure proceeds.
    Invalidated { cleared: GraceState },
}

impl TickOutcome {
    /// Whether the objective's failure path must be suppressed this tick.
    pub fn suppresses_failure(&self) -> bool {
        matches!(self, TickOutcome::Started | TickOutcome::Deferred)
    }
}

/// The grace-period state machine proper.
///
/// Pure and single-threaded: all mutation happens through `tick()` and
/// `clear()` on the caller's thread. Every transition is recomputed from
/// the full tick status, so a missed or inconsistent tick self-heals on
/// the next one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraceEngine {
    profile: GraceProfile,
    #[serde(default)]
    state: Option<GraceState>,
}

impl GraceEngine {
    pub fn new(profile: GraceProfile) -> Self {
        Self {
            profile,
            state: None,
        }
    }

    pub fn profile(&self) -> &GraceProfile {
        &self.profile
    }

    pub fn state(&self) -> Option<&GraceState> {
        self.state.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Remaining grace time at `now`, floored at zero. `None` while
    /// compliant.
    pub fn remaining_secs(&self, now: f64) -> Option<f64> {
        self.state.map(|s| s.remaining(now))
    }

    /// Evaluate one simulation tick.
    pub fn tick(&mut self, status: &TickStatus) -> TickOutcome {
        match (self.state, status.containment) {
            (None, c) if c.is_compliant() => TickOutcome::Idle,
            (Some(cleared), c) if c.is_compliant() => {
                self.state = None;
                TickOutcome::Returned { cleared }
            }
            (None, _) => {
                if !status.quest_valid() {
                    return TickOutcome::Idle;
                }
                let thresholds = self.profile.for_kind(status.kind);
                self.state = Some(GraceState {
                    kind: status.kind,
                    left_at: status.now,
                    thresholds,
                });
                TickOutcome::Started
            }
            (Some(cleared), _) => {
                if !status.quest_valid() {
                    self.state = None;
                    TickOutcome::Invalidated { cleared }
                } else if cleared.elapsed(status.now) > cleared.thresholds.timeout_secs {
                    self.state = None;
                    TickOutcome::Expired { cleared }
                } else {
                    TickOutcome::Deferred
                }
            }
        }
    }

    /// Drop any running grace period. Idempotent: clearing an already-clear
    /// engine changes nothing and returns `None`.
    pub fn clear(&mut self) -> Option<GraceState> {
        self.state.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile() -> GraceProfile {
        GraceProfile {
            poi: GraceThresholds::new(30.1, 10.0),
            area: GraceThresholds::new(12.0, 4.0),
        }
    }

    fn outside(now: f64) -> TickStatus {
        TickStatus {
            now,
            kind: ObjectiveKind::Poi,
            containment: Containment::Outside,
            quest_in_progress: true,
            player_alive: true,
        }
    }

    #[test]
    fn leaving_records_leave_time_and_selects_thresholds() {
        let mut engine = GraceEngine::new(profile());
        assert_eq!(engine.tick(&outside(100.0)), TickOutcome::Started);

        let state = engine.state().copied().expect("grace period active");
        assert_eq!(state.left_at, 100.0);
        assert_eq!(state.thresholds.timeout_secs, 30.1);
    }

    #[test]
    fn area_kind_selects_its_own_pair() {
        let mut engine = GraceEngine::new(profile());
        let status = TickStatus {
            kind: ObjectiveKind::Area,
            ..outside(5.0)
        };
        engine.tick(&status);
        assert_eq!(engine.state().map(|s| s.thresholds.timeout_secs), Some(12.0));
    }

    #[test]
    fn returning_clears_regardless_of_elapsed_time() {
        let mut engine = GraceEngine::new(profile());
        engine.tick(&outside(0.0));

        let status = TickStatus {
            containment: Containment::Inside,
            ..outside(29.9)
        };
        assert!(matches!(
            engine.tick(&status),
            TickOutcome::Returned { .. }
        ));
        assert!(!engine.is_active());
    }

    #[test]
    fn warning_zone_clears_too() {
        let mut engine = GraceEngine::new(profile());
        engine.tick(&outside(0.0));

        let status = TickStatus {
            containment: Containment::Warning,
            ..outside(3.0)
        };
        assert!(matches!(engine.tick(&status), TickOutcome::Returned { .. }));
    }

    #[test]
    fn timeout_expiry_clears_and_reports_once() {
        let mut engine = GraceEngine::new(profile());
        engine.tick(&outside(0.0));

        assert_eq!(engine.tick(&outside(30.0)), TickOutcome::Deferred);
        assert!(matches!(engine.tick(&outside(31.0)), TickOutcome::Expired { .. }));

        // The period is gone; with the quest still nominally live the next
        // outside tick opens a fresh one rather than re-reporting expiry.
        assert_eq!(engine.tick(&outside(31.5)), TickOutcome::Started);
    }

    #[test]
    fn exact_timeout_boundary_still_defers() {
        let mut engine = GraceEngine::new(profile());
        engine.tick(&outside(0.0));
        assert_eq!(engine.tick(&outside(30.1)), TickOutcome::Deferred);
    }

    #[test]
    fn player_death_invalidates_immediately() {
        let mut engine = GraceEngine::new(profile());
        engine.tick(&outside(0.0));

        let status = TickStatus {
            player_alive: false,
            ..outside(2.0)
        };
        assert!(matches!(
            engine.tick(&status),
            TickOutcome::Invalidated { .. }
        ));
        assert!(!engine.is_active());
    }

    #[test]
    fn quest_not_in_progress_invalidates() {
        let mut engine = GraceEngine::new(profile());
        engine.tick(&outside(0.0));

        let status = TickStatus {
            quest_in_progress: false,
            ..outside(2.0)
        };
        assert!(matches!(
            engine.tick(&status),
            TickOutcome::Invalidated { .. }
        ));
    }

    #[test]
    fn no_grace_starts_for_invalid_quest() {
        let mut engine = GraceEngine::new(profile());
        let status = TickStatus {
            quest_in_progress: false,
            ..outside(0.0)
        };
        assert_eq!(engine.tick(&status), TickOutcome::Idle);
        assert!(!engine.is_active());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut engine = GraceEngine::new(profile());
        engine.tick(&outside(0.0));
        assert!(engine.clear().is_some());
        assert!(engine.clear().is_none());
    }

    #[test]
    fn remaining_floors_at_zero() {
        let mut engine = GraceEngine::new(profile());
        engine.tick(&outside(0.0));
        assert_eq!(engine.remaining_secs(1000.0), Some(0.0));
    }

    proptest! {
        #[test]
        fn remaining_never_negative(left_at in -1.0e6f64..1.0e6, now in -1.0e6f64..1.0e6) {
            let mut engine = GraceEngine::new(profile());
            engine.tick(&outside(left_at));
            if let Some(remaining) = engine.remaining_secs(now) {
                prop_assert!(remaining >= 0.0);
            }
        }

        #[test]
        fn deferred_until_timeout_exceeded(elapsed in 0.0f64..30.1) {
            let mut engine = GraceEngine::new(profile());
            engine.tick(&outside(0.0));
            prop_assert_eq!(engine.tick(&outside(elapsed)), TickOutcome::Deferred);
        }
    }
}
