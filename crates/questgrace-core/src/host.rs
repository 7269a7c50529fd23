//! Accessor contracts toward the host simulation.
//!
//! The host owns the quest, the journal, the player, and the tracker UI;
//! this crate only observes and nudges them. Rather than patching host
//! methods in place, the integration layer implements these traits and
//! calls the context's hooks from the corresponding host events.

use serde::{Deserialize, Serialize};

use crate::area::StayWithinArea;
use crate::grace::ObjectiveKind;

/// Host-side objective state, mirrored at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveState {
    InProgress,
    Warning,
    Complete,
    Failed,
}

/// Host-side quest state, mirrored at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestState {
    InProgress,
    Completed,
    Failed,
}

/// Accessor contract for the stay-within objective under evaluation.
///
/// `reevaluate` must re-run the objective's own containment check
/// synchronously, as if its regular update tick had just fired.
pub trait ObjectiveHandle: Send {
    fn kind(&self) -> ObjectiveKind;
    fn state(&self) -> ObjectiveState;
    fn set_state(&mut self, state: ObjectiveState);
    fn reevaluate(&mut self);
    fn bounds(&self) -> StayWithinArea;
    fn set_bounds(&mut self, bounds: StayWithinArea);
}

/// Forces the host's quest tracker to re-read its binding values.
///
/// The host UI does not repaint the countdown on its own cadence; the
/// refresh trigger calls this from its timer thread, so implementations
/// must be cheap and must tolerate being called while the game is paused.
pub trait UiRefresher: Send {
    fn refresh(&mut self);
}

/// Shrink a point-of-interest objective's warning margin by the configured
/// out-zone multiplier. Call once when the objective's bounds are parsed;
/// rectangular areas are left untouched.
pub fn apply_poi_margin(objective: &mut dyn ObjectiveHandle, multiplier: f64) {
    let mut bounds = objective.bounds();
    bounds.apply_margin_multiplier(multiplier);
    objective.set_bounds(bounds);
}
