//! Per-quest-instance orchestration.
//!
//! `GraceContext` wires the state machine, the refresh trigger, and the
//! tracker bindings together behind the three host hook points. Whatever
//! drives quest evaluation owns one context per tracked quest and passes
//! it explicitly; nothing here is process-global, so several contexts can
//! run grace periods side by side.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use chrono::Utc;

use crate::bindings::{
    format_time_left, TrackerBindings, BINDING_TIME_COLOR, BINDING_TIME_LEFT, BINDING_WARNING,
    COLOR_NORMAL,
};
use crate::events::{ClearReason, Event};
use crate::grace::{GraceEngine, GraceState, TickOutcome, TickStatus};
use crate::host::{ObjectiveHandle, QuestState, UiRefresher};
use crate::refresh::{RefreshGate, RefreshTrigger, REFRESH_PERIOD};
use crate::settings::Settings;

/// What the quest-close hook should do with a failing close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Proceed,
    /// A grace period is running; the close must not go through yet.
    Suppress,
}

/// One quest's grace-period machinery.
///
/// Invariant: a recorded leave time and a running refresh trigger always
/// exist together or not at all. All state mutation happens on the
/// caller's thread; the trigger thread only reads the shared active flag
/// and invokes the mutex-guarded UI refresh.
pub struct GraceContext {
    engine: GraceEngine,
    gate: Arc<RefreshGate>,
    trigger: Option<RefreshTrigger>,
    refresh_period: Duration,
    /// Transient handle to whichever objective is being evaluated, used
    /// only to re-invoke its evaluation when the countdown hits zero.
    objective: Option<Weak<Mutex<dyn ObjectiveHandle>>>,
    bindings: TrackerBindings,
    pending: Vec<Event>,
}

impl GraceContext {
    pub fn new(settings: &Settings, ui: Box<dyn UiRefresher>) -> Self {
        Self::with_refresh_period(settings, ui, REFRESH_PERIOD)
    }

    pub fn with_refresh_period(
        settings: &Settings,
        ui: Box<dyn UiRefresher>,
        refresh_period: Duration,
    ) -> Self {
        Self {
            engine: GraceEngine::new(settings.profile()),
            gate: Arc::new(RefreshGate::new(ui)),
            trigger: None,
            refresh_period,
            objective: None,
            bindings: TrackerBindings::new(),
            pending: Vec::new(),
        }
    }

    pub fn engine(&self) -> &GraceEngine {
        &self.engine
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    /// Hook: called from the governing objective's update, once per
    /// simulation tick. Runs the full grace-period transition and keeps
    /// the refresh trigger in lockstep with the recorded leave time.
    pub fn on_objective_tick(
        &mut self,
        objective: &Arc<Mutex<dyn ObjectiveHandle>>,
        status: TickStatus,
    ) -> TickOutcome {
        self.objective = Some(Arc::downgrade(objective));
        let outcome = self.engine.tick(&status);
        match outcome {
            TickOutcome::Started => {
                if let Some(state) = self.engine.state().copied() {
                    self.begin_refresh();
                    self.bindings.reset();
                    tracing::debug!(
                        kind = ?state.kind,
                        left_at = state.left_at,
                        timeout_secs = state.thresholds.timeout_secs,
                        "grace period started"
                    );
                    self.pending.push(Event::GraceStarted {
                        kind: state.kind,
                        left_at: state.left_at,
                        timeout_secs: state.thresholds.timeout_secs,
                        hot_secs: state.thresholds.hot_secs,
                        at: Utc::now(),
                    });
                }
            }
            TickOutcome::Returned { cleared } => {
                self.finish(cleared, ClearReason::Returned, status.now);
            }
            TickOutcome::Expired { cleared } => {
                self.finish(cleared, ClearReason::Expired, status.now);
            }
            TickOutcome::Invalidated { cleared } => {
                let reason = if !status.player_alive {
                    ClearReason::PlayerDead
                } else {
                    ClearReason::QuestInvalid
                };
                self.finish(cleared, reason, status.now);
            }
            TickOutcome::Idle | TickOutcome::Deferred => {}
        }
        outcome
    }

    /// Hook: called when the host is about to close a quest. Only
    /// consults state; the transition work all happens in the tick hook.
    pub fn on_quest_close(&self, final_state: QuestState) -> CloseDecision {
        if final_state == QuestState::Failed && self.engine.is_active() {
            CloseDecision::Suppress
        } else {
            CloseDecision::Proceed
        }
    }

    /// Hook: named binding query from the tracker window. Returns `None`
    /// for names this crate does not own, so the host's regular binding
    /// lookup can proceed.
    pub fn binding_value(&mut self, name: &str, now: f64) -> Option<String> {
        match name {
            BINDING_WARNING => {
                let showing = self
                    .engine
                    .remaining_secs(now)
                    .map(|r| r > 0.0)
                    .unwrap_or(false);
                Some(showing.to_string())
            }
            BINDING_TIME_LEFT => match self.engine.state().copied() {
                Some(state) => {
                    let remaining = state.remaining(now);
                    let crossed_zero = self.bindings.update(remaining, state.thresholds.hot_secs);
                    if crossed_zero {
                        // Don't wait for the next natural tick to assess
                        // the failure.
                        self.reevaluate_objective();
                    }
                    Some(format_time_left(remaining))
                }
                None => Some(String::new()),
            },
            BINDING_TIME_COLOR => {
                let color = if self.engine.is_active() {
                    self.bindings.color
                } else {
                    COLOR_NORMAL
                };
                Some(color.to_string())
            }
            _ => None,
        }
    }

    /// Clear any grace period outside the tick path, e.g. when the host
    /// tears the quest instance down. Idempotent: when already clear it
    /// issues no UI refresh and no event, though it still defensively
    /// stops the trigger.
    pub fn clear(&mut self) -> bool {
        self.gate.set_active(false);
        self.halt_trigger();
        match self.engine.clear() {
            Some(cleared) => {
                self.bindings.reset();
                self.gate.refresh_ui();
                tracing::debug!("grace period cleared");
                self.pending.push(Event::GraceCleared {
                    kind: cleared.kind,
                    reason: ClearReason::Superseded,
                    elapsed_secs: None,
                    at: Utc::now(),
                });
                true
            }
            None => false,
        }
    }

    fn begin_refresh(&mut self) {
        // A new grace period always disposes any prior trigger first.
        self.halt_trigger();
        self.gate.set_active(true);
        self.trigger = Some(RefreshTrigger::start(
            self.refresh_period,
            Arc::clone(&self.gate),
        ));
    }

    /// Tear down after a period ended inside the tick hook: trigger stops
    /// before the final refresh, which repaints the tracker without the
    /// countdown.
    fn finish(&mut self, cleared: GraceState, reason: ClearReason, now: f64) {
        self.gate.set_active(false);
        self.halt_trigger();
        self.bindings.reset();
        self.gate.refresh_ui();
        tracing::debug!(?reason, "grace period cleared");
        self.pending.push(Event::GraceCleared {
            kind: cleared.kind,
            reason,
            elapsed_secs: Some(cleared.elapsed(now)),
            at: Utc::now(),
        });
    }

    fn halt_trigger(&mut self) {
        if let Some(mut trigger) = self.trigger.take() {
            trigger.stop();
        }
    }

    fn reevaluate_objective(&self) {
        let Some(objective) = self.objective.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        if let Ok(mut objective) = objective.lock() {
            objective.reevaluate();
        }
    }
}
