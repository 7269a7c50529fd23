use serde::{Deserialize, Serialize};

/// Which flavor of stay-within objective governs the current grace period.
///
/// The two kinds carry independently configurable timeout pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveKind {
    /// Point-of-interest objective with a radius-based region.
    Poi,
    /// Generic stay-within-area objective.
    Area,
}

/// Timeout pair for one objective kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraceThresholds {
    /// Total allowed time outside the area, in seconds.
    pub timeout_secs: f64,
    /// Remaining time at or below which the countdown displays urgent.
    pub hot_secs: f64,
}

impl GraceThresholds {
    pub const fn new(timeout_secs: f64, hot_secs: f64) -> Self {
        Self {
            timeout_secs,
            hot_secs,
        }
    }
}

/// The per-kind threshold table, fixed at load time and consulted again
/// each time a new grace period begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraceProfile {
    pub poi: GraceThresholds,
    pub area: GraceThresholds,
}

impl GraceProfile {
    pub fn for_kind(&self, kind: ObjectiveKind) -> GraceThresholds {
        match kind {
            ObjectiveKind::Poi => self.poi,
            ObjectiveKind::Area => self.area,
        }
    }
}

impl Default for GraceProfile {
    fn default() -> Self {
        Self {
            poi: GraceThresholds::new(10.05, 5.0),
            area: GraceThresholds::new(10.05, 5.0),
        }
    }
}
