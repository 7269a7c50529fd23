use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grace::ObjectiveKind;

/// Why a grace period ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearReason {
    /// Player came back within the allowed bounds.
    Returned,
    PlayerDead,
    /// Quest no longer in progress.
    QuestInvalid,
    /// The timeout elapsed and the real failure proceeded.
    Expired,
    /// The context was cleared from outside the tick path, e.g. the host
    /// tearing the quest instance down.
    Superseded,
}

/// Every grace-period state change produces an Event. The host integration
/// drains them from the context and forwards them wherever it logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    GraceStarted {
        kind: ObjectiveKind,
        /// Simulation time at which the player left the area.
        left_at: f64,
        timeout_secs: f64,
        hot_secs: f64,
        at: DateTime<Utc>,
    },
    GraceCleared {
        kind: ObjectiveKind,
        reason: ClearReason,
        /// Time spent outside, when the clearing path knows it.
        elapsed_secs: Option<f64>,
        at: DateTime<Utc>,
    },
}
