mod engine;
mod thresholds;

pub use engine::{GraceEngine, GraceState, TickOutcome, TickStatus};
pub use thresholds::{GraceProfile, GraceThresholds, ObjectiveKind};
